//! Damage records

use loam_core::EntityId;
use serde::{Deserialize, Serialize};

/// One instance of damage, carrying who dealt it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Damage {
    /// Hit points removed
    pub amount: i32,
    /// Dealing entity, `None` for environmental damage
    pub source: Option<EntityId>,
}

impl Damage {
    pub fn new(amount: i32, source: Option<EntityId>) -> Self {
        Self { amount, source }
    }
}
