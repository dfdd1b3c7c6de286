//! Error types for the collision system

use crate::registry::HitboxId;
use thiserror::Error;

/// Collision system errors
#[derive(Debug, Error)]
pub enum CollisionError {
    /// Hitbox id is stale or was pruned
    #[error("hitbox not found: {0:?}")]
    HitboxNotFound(HitboxId),

    /// Geometry assignment produced a non-finite value
    #[error(transparent)]
    Scale(#[from] loam_scale::ScaleError),
}

/// Result type for collision operations
pub type Result<T> = std::result::Result<T, CollisionError>;
