//! Loam Collision - Hitbox Registry and Collision Testing
//!
//! Axis-aligned boxes double as physical-blocking volumes and interaction
//! triggers. The registry owns every active box, tests overlap once per
//! tick in registration order, and invokes per-box overlap callbacks.
//!
//! # Features
//!
//! - Blocking (collision) vs combat vs trigger-only boxes
//! - Lazy pruning: deactivation is a flag, membership changes next tick
//! - Deterministic callback order for a fixed registration order
//! - Per-axis movement-blocking queries
//!
//! # Example
//!
//! ```ignore
//! use loam_collision::prelude::*;
//!
//! let mut registry = HitboxRegistry::new(viewport);
//! let zone = registry.register(
//!     Hitbox::trigger(&viewport, 500.0, 500.0, 128.0, 128.0)?
//!         .on_overlap(|event| log::info!("touched by {:?}", event.other_owner)),
//! );
//! ```

pub mod error;
pub mod events;
pub mod hitbox;
pub mod registry;

pub mod prelude {
    pub use crate::error::{CollisionError, Result};
    pub use crate::events::{OverlapEvent, OverlapCallback};
    pub use crate::hitbox::{Aabb, Hitbox};
    pub use crate::registry::{HitboxId, HitboxRegistry};
}

pub use prelude::*;
