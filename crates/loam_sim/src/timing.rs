//! Fixed-tick timing
//!
//! The simulation advances in fixed ticks regardless of how often the
//! host calls in. Real time goes into an accumulator; each time a full
//! tick of it is available the world steps once. No sub-tick
//! interpolation: rendering reads whatever state the last tick left.

use std::time::Instant;

/// Default simulation rate in ticks per second
pub const DEFAULT_TPS: u32 = 128;

/// Tick accumulator
#[derive(Debug, Clone)]
pub struct TickTiming {
    /// Target ticks per second
    pub target_tps: u32,
    /// Length of one tick in milliseconds
    pub tick_ms: f64,
    /// Accumulated real time not yet simulated
    pub accumulator_ms: f64,
    /// Total simulated time, the clock handed to behavior updates
    pub sim_time_ms: f64,
}

impl TickTiming {
    pub fn new(target_tps: u32) -> Self {
        Self {
            target_tps,
            tick_ms: 1000.0 / target_tps as f64,
            accumulator_ms: 0.0,
            sim_time_ms: 0.0,
        }
    }

    /// Feed elapsed real time
    pub fn advance(&mut self, delta_ms: f64) {
        self.accumulator_ms += delta_ms;
    }

    /// Consume one tick of accumulated time if available, moving the
    /// simulated clock forward
    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator_ms >= self.tick_ms {
            self.accumulator_ms -= self.tick_ms;
            self.sim_time_ms += self.tick_ms;
            true
        } else {
            false
        }
    }

    /// Drop accumulated time, e.g. after a pause
    pub fn reset_accumulator(&mut self) {
        self.accumulator_ms = 0.0;
    }
}

impl Default for TickTiming {
    fn default() -> Self {
        Self::new(DEFAULT_TPS)
    }
}

/// Wall-clock driver for a [`TickTiming`]
#[derive(Debug)]
pub struct SimLoop {
    pub timing: TickTiming,
    last: Instant,
}

impl SimLoop {
    pub fn new(target_tps: u32) -> Self {
        Self {
            timing: TickTiming::new(target_tps),
            last: Instant::now(),
        }
    }

    /// Measure elapsed wall time and step `step` once per full tick,
    /// passing the simulated clock. Returns how many ticks ran.
    pub fn pump<E>(
        &mut self,
        mut step: impl FnMut(f64) -> Result<(), E>,
    ) -> Result<u32, E> {
        let now = Instant::now();
        let delta_ms = now.duration_since(self.last).as_secs_f64() * 1000.0;
        self.last = now;
        self.timing.advance(delta_ms);

        let mut ticks = 0;
        while self.timing.consume_tick() {
            step(self.timing.sim_time_ms)?;
            ticks += 1;
        }
        Ok(ticks)
    }
}

impl Default for SimLoop {
    fn default() -> Self {
        Self::new(DEFAULT_TPS)
    }
}
