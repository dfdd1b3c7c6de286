//! Overlap events and callbacks

use crate::registry::HitboxId;
use loam_core::EntityId;

/// Fired for every overlapping pair, once per tick while overlap persists
#[derive(Debug, Clone, Copy)]
pub struct OverlapEvent {
    /// The box whose callback is being invoked
    pub this: HitboxId,
    /// The box it overlaps
    pub other: HitboxId,
    /// Owner of `this` (None for scenery/trigger-only boxes)
    pub this_owner: Option<EntityId>,
    /// Owner of `other`
    pub other_owner: Option<EntityId>,
    /// Tag bits of `other`; lets a player-only trigger check
    /// `tags::has(event.other_tags, tags::PLAYER)` and return for anyone
    /// else
    pub other_tags: u32,
    /// Tick timestamp in milliseconds
    pub time: f64,
}

/// Per-hitbox overlap callback.
///
/// Must be a total function over the event: a non-matching overlap (wrong
/// tag, wrong owner) checks and returns, it never panics. Structural
/// world mutations go through the scheduler, not through here.
pub type OverlapCallback = Box<dyn FnMut(&OverlapEvent) + Send>;

/// One-shot callback fired when the hitbox is registered
pub type CommandCallback = Box<dyn FnOnce() + Send>;
