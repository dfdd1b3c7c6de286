//! Loam Sim - Simulation Core
//!
//! The headless game simulation: a fixed-tick world owning entities,
//! mobs, projectiles and the hitbox registry, with narrow traits to
//! the host for the player, tilesets and overlays.
//!
//! # Features
//!
//! - Explicit `World` context, no globals
//! - Fixed 128 TPS tick loop with a real-time accumulator
//! - Deferred command scheduler for structural mutations
//! - Per-mob fault isolation: a panicking update is logged and skipped
//! - Preset mobs, teleport/switch zones, JSON save records
//!
//! # Example
//!
//! ```ignore
//! use loam_sim::prelude::*;
//!
//! let mut world = World::new(Viewport::new(1920.0, 1080.0));
//! world.spawn_mob(MobKind::Stalker, MapId(0), 640.0, 320.0)?;
//! let mut sim = SimLoop::default();
//! loop {
//!     sim.pump(|time| world.tick(time))?;
//! }
//! ```

pub mod entity;
pub mod error;
pub mod interfaces;
pub mod mob;
pub mod save;
pub mod scheduler;
pub mod timing;
pub mod world;
pub mod zones;

pub mod prelude {
    pub use crate::entity::{BoxDesc, Entity};
    pub use crate::error::{Result, SimError};
    pub use crate::interfaces::{OverlayHook, TargetProvider, TilesetResolver};
    pub use crate::mob::{build_preset, AttackContext, AttackHook, Mob, MobKind, MobRecord};
    pub use crate::save::SaveGame;
    pub use crate::scheduler::CommandScheduler;
    pub use crate::timing::{SimLoop, TickTiming, DEFAULT_TPS};
    pub use crate::world::{World, ZoneAction, DEFAULT_TILE_SIZE};
    pub use crate::zones::{create_switch_pair, create_teleport_pair, ZoneDesc};

    pub use loam_core::{tags, EntityId, MapId};
    pub use loam_scale::Viewport;
}

pub use prelude::*;
