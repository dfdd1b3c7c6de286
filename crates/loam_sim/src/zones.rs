//! Paired teleport and map-switch zones
//!
//! The usual level wiring: two zones that send the player to each
//! other's landing point, either within one map or across two. Each
//! zone fires only on player-tagged bodies and resolves through a
//! scheduled command, so a non-player mob standing in a doorway does
//! nothing.

use crate::error::Result;
use crate::world::{World, ZoneAction};
use loam_collision::HitboxId;
use loam_core::MapId;

/// Axis-aligned zone footprint, center-based like hitboxes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneDesc {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ZoneDesc {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Two teleport zones on one map: stepping into `zone_a` lands the
/// player at `dest_b`, and stepping into `zone_b` lands at `dest_a`.
pub fn create_teleport_pair(
    world: &mut World,
    map: MapId,
    zone_a: ZoneDesc,
    dest_a: [f32; 2],
    zone_b: ZoneDesc,
    dest_b: [f32; 2],
) -> Result<(HitboxId, HitboxId)> {
    let a = world.add_zone(
        [zone_a.x, zone_a.y],
        [zone_a.width, zone_a.height],
        ZoneAction::Teleport { map, dest: dest_b },
    )?;
    let b = world.add_zone(
        [zone_b.x, zone_b.y],
        [zone_b.width, zone_b.height],
        ZoneAction::Teleport { map, dest: dest_a },
    )?;
    Ok((a, b))
}

/// Two map-switch zones: `zone_a` on `map_a` sends the player to
/// `dest_in_b` on `map_b`, and `zone_b` the other way around.
#[allow(clippy::too_many_arguments)]
pub fn create_switch_pair(
    world: &mut World,
    map_a: MapId,
    zone_a: ZoneDesc,
    dest_in_a: [f32; 2],
    map_b: MapId,
    zone_b: ZoneDesc,
    dest_in_b: [f32; 2],
) -> Result<(HitboxId, HitboxId)> {
    let a = world.add_zone(
        [zone_a.x, zone_a.y],
        [zone_a.width, zone_a.height],
        ZoneAction::Switch {
            from: map_a,
            to: map_b,
            dest: dest_in_b,
        },
    )?;
    let b = world.add_zone(
        [zone_b.x, zone_b.y],
        [zone_b.width, zone_b.height],
        ZoneAction::Switch {
            from: map_b,
            to: map_a,
            dest: dest_in_a,
        },
    )?;
    Ok((a, b))
}
