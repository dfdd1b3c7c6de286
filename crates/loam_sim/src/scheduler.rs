//! Deferred command scheduler
//!
//! Structural mutations (spawns, map switches, target teleports) are
//! queued as commands and run at the top of a later tick, so nothing
//! mutates the world mid-walk. Cancellation does not exist; the only
//! way to not run a command is to never schedule it.

/// A deferred mutation of the context `C`
pub type Command<C> = Box<dyn FnOnce(&mut C) + Send>;

/// Tick-delayed command queue
pub struct CommandScheduler<C> {
    pending: Vec<(u32, Command<C>)>,
}

impl<C> CommandScheduler<C> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Queue `command` to run after `delay_ticks` full ticks. A delay
    /// of zero runs at the top of the next tick.
    pub fn schedule<F>(&mut self, command: F, delay_ticks: u32)
    where
        F: FnOnce(&mut C) + Send + 'static,
    {
        self.pending.push((delay_ticks, Box::new(command)));
    }

    /// Pull every due command (in scheduling order) and decrement the
    /// rest
    pub fn drain_due(&mut self) -> Vec<Command<C>> {
        let mut due = Vec::new();
        let mut keep = Vec::with_capacity(self.pending.len());
        for (delay, command) in self.pending.drain(..) {
            if delay == 0 {
                due.push(command);
            } else {
                keep.push((delay - 1, command));
            }
        }
        self.pending = keep;
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<C> Default for CommandScheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for CommandScheduler<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandScheduler")
            .field("pending", &self.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_delay_runs_next_drain() {
        let mut scheduler: CommandScheduler<Vec<u32>> = CommandScheduler::new();
        scheduler.schedule(|sink| sink.push(1), 0);
        let mut sink = Vec::new();
        for command in scheduler.drain_due() {
            command(&mut sink);
        }
        assert_eq!(sink, vec![1]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_delay_counts_drains() {
        let mut scheduler: CommandScheduler<Vec<u32>> = CommandScheduler::new();
        scheduler.schedule(|sink| sink.push(7), 2);
        let mut sink = Vec::new();

        for _ in 0..2 {
            for command in scheduler.drain_due() {
                command(&mut sink);
            }
            assert!(sink.is_empty());
        }
        for command in scheduler.drain_due() {
            command(&mut sink);
        }
        assert_eq!(sink, vec![7]);
    }

    #[test]
    fn test_due_commands_run_in_scheduling_order() {
        let mut scheduler: CommandScheduler<Vec<u32>> = CommandScheduler::new();
        scheduler.schedule(|sink| sink.push(1), 0);
        scheduler.schedule(|sink| sink.push(2), 0);
        scheduler.schedule(|sink| sink.push(3), 0);
        let mut sink = Vec::new();
        for command in scheduler.drain_due() {
            command(&mut sink);
        }
        assert_eq!(sink, vec![1, 2, 3]);
    }
}
