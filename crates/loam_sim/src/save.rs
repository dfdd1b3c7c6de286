//! Save records
//!
//! A save is a small JSON document: the active map, the player's
//! position, the viewport width it was taken at and one record per
//! live mob. Restoring respawns mobs from their records; it does not
//! try to resurrect hitbox ids or timers.

use crate::error::Result;
use crate::mob::MobRecord;
use serde::{Deserialize, Serialize};

/// The serialized shape of a game in progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub current_map: u32,
    pub player_x: f32,
    pub player_y: f32,
    /// Reference width at capture time, for diagnosing scale drift
    pub viewport_width: f32,
    pub mobs: Vec<MobRecord>,
}

impl SaveGame {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
