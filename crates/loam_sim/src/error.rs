//! Simulation error types

use loam_core::EntityId;
use thiserror::Error;

/// Errors raised by the simulation layer
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Scale(#[from] loam_scale::ScaleError),

    #[error(transparent)]
    Collision(#[from] loam_collision::CollisionError),

    #[error(transparent)]
    AiConfig(#[from] loam_ai::AiConfigError),

    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("unknown mob kind: {0}")]
    UnknownMobKind(String),

    #[error("save data: {0}")]
    Save(#[from] serde_json::Error),
}

/// Result alias for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;
