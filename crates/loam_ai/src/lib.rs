//! Loam AI - Mob Behavior System
//!
//! This crate drives non-player entities: what a mob wants to do each
//! tick, expressed as a velocity and an attack decision. The simulation
//! layer owns movement and combat; the brain only decides.
//!
//! # Features
//!
//! - Validated AI descriptors built from capability bundles
//! - Hierarchical behavior selection (follower > hostile > wandering)
//! - Wandering with anchor containment
//! - Chase, rush (dash + attack burst) and long-range kiting routines
//! - Seedable per-mob randomness for reproducible tests
//!
//! # Example
//!
//! ```ignore
//! use loam_ai::prelude::*;
//!
//! let config = AiDescriptor::new()
//!     .set_wandering(&viewport, 2.0, 120.0, 3000.0)?
//!     .set_rusher(&viewport, 600.0, 2.5, 10_000.0, 4)?
//!     .set_attack(&viewport, 2000.0, 500.0, 14.0)?
//!     .build()?;
//! let mut brain = MobBrain::new(config, 7);
//! ```

pub mod behavior;
pub mod brain;
pub mod descriptor;
pub mod state;

pub mod prelude {
    pub use crate::behavior::{select_behavior, Behavior, CapabilityFlags};
    pub use crate::brain::{BrainOutput, MobBrain};
    pub use crate::descriptor::{
        AiConfig, AiConfigError, AiDescriptor, AttackParams, FollowerParams, LongRangeParams,
        RusherParams, WanderingParams,
    };
    pub use crate::state::{AiState, AnimState};
}

pub use prelude::*;
