//! # loam_core - Loam Engine Core
//!
//! Zero-dependency core primitives shared by every simulation crate:
//! entity and map identifiers, and the tag bits hitbox callbacks use to
//! tell apart who touched them.

pub mod id;
pub mod tags;

pub use id::{EntityId, MapId};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::id::{EntityId, MapId};
    pub use crate::tags;
}
