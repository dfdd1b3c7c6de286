//! Behavior selection
//!
//! One total function from capability flags and the tick's observations
//! to the routine that runs. Priority order: follower beats everything,
//! hostile routines run only inside vision range, wandering is the
//! fallback.

use crate::descriptor::AiConfig;
use serde::{Deserialize, Serialize};

/// Which bundles a config carries, flattened for selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityFlags {
    pub follower: bool,
    pub rusher: bool,
    pub long_range: bool,
}

impl From<&AiConfig> for CapabilityFlags {
    fn from(config: &AiConfig) -> Self {
        Self {
            follower: config.follower.is_some(),
            rusher: config.rusher.is_some(),
            long_range: config.long_range.is_some(),
        }
    }
}

/// The routine selected for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    Chase,
    Rush,
    LongRange,
    Wander,
}

/// Select the routine for one tick.
///
/// `rush_ready` is the caller's cooldown verdict (including the
/// early-rush clause for middle-ranged mobs); `rushing` reports whether
/// a rush is already in progress, which always continues.
pub fn select_behavior(
    caps: CapabilityFlags,
    in_vision: bool,
    rush_ready: bool,
    rushing: bool,
) -> Behavior {
    if caps.follower {
        return Behavior::Chase;
    }
    if !in_vision {
        return Behavior::Wander;
    }
    match (caps.rusher, caps.long_range) {
        (true, true) => {
            if rushing || rush_ready {
                Behavior::Rush
            } else {
                Behavior::LongRange
            }
        }
        (true, false) => {
            if rushing || rush_ready {
                Behavior::Rush
            } else {
                Behavior::Chase
            }
        }
        (false, true) => Behavior::LongRange,
        (false, false) => Behavior::Wander,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUSHER: CapabilityFlags = CapabilityFlags {
        follower: false,
        rusher: true,
        long_range: false,
    };
    const MIDDLE: CapabilityFlags = CapabilityFlags {
        follower: false,
        rusher: true,
        long_range: true,
    };
    const FOLLOWER: CapabilityFlags = CapabilityFlags {
        follower: true,
        rusher: false,
        long_range: false,
    };

    #[test]
    fn test_follower_always_chases() {
        assert_eq!(select_behavior(FOLLOWER, false, false, false), Behavior::Chase);
        assert_eq!(select_behavior(FOLLOWER, true, true, true), Behavior::Chase);
    }

    #[test]
    fn test_out_of_vision_wanders() {
        assert_eq!(select_behavior(RUSHER, false, true, false), Behavior::Wander);
        assert_eq!(select_behavior(MIDDLE, false, true, false), Behavior::Wander);
    }

    #[test]
    fn test_rush_continues_once_started() {
        assert_eq!(select_behavior(RUSHER, true, false, true), Behavior::Rush);
        assert_eq!(select_behavior(MIDDLE, true, false, true), Behavior::Rush);
    }

    #[test]
    fn test_middle_ranged_kites_until_rush_ready() {
        assert_eq!(
            select_behavior(MIDDLE, true, false, false),
            Behavior::LongRange
        );
        assert_eq!(select_behavior(MIDDLE, true, true, false), Behavior::Rush);
    }

    #[test]
    fn test_rusher_chases_between_rushes() {
        assert_eq!(select_behavior(RUSHER, true, false, false), Behavior::Chase);
        assert_eq!(select_behavior(RUSHER, true, true, false), Behavior::Rush);
    }
}
