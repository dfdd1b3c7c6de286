//! Narrow traits to the host application
//!
//! The simulation never owns the player, the renderer or the asset
//! store. Everything it needs from them comes through these traits so
//! the core stays headless and testable.

use loam_core::MapId;

/// Supplies the position of the entity mobs track, usually the player.
///
/// `position` returns `None` when no target exists on `map`, which
/// sends every hostile mob back to wandering.
pub trait TargetProvider: Send {
    fn position(&self, map: MapId) -> Option<[f32; 2]>;

    /// Move the target, used by teleport and map-switch zones
    fn teleport(&mut self, map: MapId, position: [f32; 2]);
}

/// Resolves on-screen tile sizes by tileset key
pub trait TilesetResolver: Send {
    fn tile_size(&self, key: &str) -> Option<f32>;
}

/// A modal overlay (menu, dialog). While active it is the only thing
/// the world updates.
pub trait OverlayHook: Send {
    fn update(&mut self, time: f64);
    fn active(&self) -> bool;
}
