//! AI and animation state enumerations
//!
//! The two are independent: the AI state names the active behavior
//! routine, the animation state names what the body is doing. A rushing
//! mob that has finished its dash is still in the rushing behavior but
//! animates as idle while it attacks.

use serde::{Deserialize, Serialize};

/// Which behavior routine drives the mob this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiState {
    /// Random walk around an anchor point
    Wandering,
    /// Anchored in place (a wanderer with zero speed)
    Still,
    /// Direct pursuit of the target
    Chasing,
    /// Dash burst toward the target
    Rushing,
    /// Kiting at a preferred distance
    LongRangeAttacking,
}

/// What the body is doing, for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimState {
    Idle,
    Walk,
    Attack,
    /// Dragged by an external force, movement suppressed
    Drag,
    Rushing,
}

impl Default for AiState {
    fn default() -> Self {
        AiState::Wandering
    }
}

impl Default for AnimState {
    fn default() -> Self {
        AnimState::Idle
    }
}
