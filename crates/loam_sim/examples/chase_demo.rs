//! Headless chase demo: a stalker hunting a scripted player.
//!
//! Run with `RUST_LOG=debug` to watch spawns and state changes.

use std::sync::Arc;

use parking_lot::Mutex;

use loam_sim::prelude::*;

#[derive(Clone)]
struct ScriptedPlayer(Arc<Mutex<[f32; 2]>>);

impl TargetProvider for ScriptedPlayer {
    fn position(&self, _map: MapId) -> Option<[f32; 2]> {
        Some(*self.0.lock())
    }

    fn teleport(&mut self, _map: MapId, position: [f32; 2]) {
        *self.0.lock() = position;
    }
}

fn main() -> loam_sim::Result<()> {
    env_logger::init();

    let mut world = World::new(Viewport::new(1920.0, 1080.0));
    let player = ScriptedPlayer(Arc::new(Mutex::new([1400.0, 540.0])));
    world.set_target(Box::new(player.clone()));

    let stalker = world.spawn_mob(MobKind::Stalker, MapId(0), 400.0, 540.0)?;
    let wanderer = world.spawn_mob(MobKind::Wanderer, MapId(0), 900.0, 200.0)?;

    let viewport = world.viewport().clone();
    let mut sim = SimLoop::default();
    let mut next_report = 0.0;

    while sim.timing.sim_time_ms < 10_000.0 {
        sim.pump(|time| {
            // the player slowly circles the arena center
            let angle = (time / 4000.0) as f32 * std::f32::consts::TAU;
            *player.0.lock() = [960.0 + 500.0 * angle.cos(), 540.0 + 300.0 * angle.sin()];
            world.tick(time)
        })?;

        if sim.timing.sim_time_ms >= next_report {
            next_report += 500.0;
            if let Some(mob) = world.mob(stalker) {
                let [x, y] = mob.entity.position(&viewport);
                log::info!(
                    "t={:.0}ms stalker at ({x:.0}, {y:.0}) state={:?} projectiles={}",
                    sim.timing.sim_time_ms,
                    mob.brain.ai_state(),
                    world.projectiles.len()
                );
            }
            if let Some(mob) = world.mob(wanderer) {
                let [x, y] = mob.entity.position(&viewport);
                log::info!("t={:.0}ms wanderer at ({x:.0}, {y:.0})", sim.timing.sim_time_ms);
            }
        }
        std::thread::sleep(std::time::Duration::from_millis(2));
    }
    Ok(())
}
