//! Hitbox registry and per-tick collision resolution

use crate::error::{CollisionError, Result};
use crate::events::OverlapEvent;
use crate::hitbox::Hitbox;
use loam_scale::Viewport;

/// Handle to a registered hitbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitboxId(u32);

impl HitboxId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owns every active hitbox of a world.
///
/// Registration order is the only ordering guarantee: overlap callbacks
/// fire in it, which makes resolution deterministic for a fixed
/// registration sequence. Deactivation is a flag write; list membership
/// only changes in [`prune`], never mid-tick.
///
/// [`prune`]: HitboxRegistry::prune
pub struct HitboxRegistry {
    viewport: Viewport,
    slots: Vec<Option<Hitbox>>,
    /// All live ids in registration order
    order: Vec<HitboxId>,
    /// Movement-blocking boxes, registration order
    collision: Vec<HitboxId>,
    /// Combat detection boxes, registration order
    combat: Vec<HitboxId>,
}

impl HitboxRegistry {
    /// Create an empty registry resolving against `viewport`
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            slots: Vec::new(),
            order: Vec::new(),
            collision: Vec::new(),
            combat: Vec::new(),
        }
    }

    /// The viewport this registry resolves geometry against
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Register a hitbox, appending it to the master list and to the
    /// collision/combat sub-lists its flags select. Fires the one-shot
    /// command callback, if any.
    pub fn register(&mut self, mut hitbox: Hitbox) -> HitboxId {
        let id = HitboxId(self.slots.len() as u32);
        let command = hitbox.command.take();

        if hitbox.is_collision {
            self.collision.push(id);
        }
        if hitbox.is_combat {
            self.combat.push(id);
        }
        self.order.push(id);
        self.slots.push(Some(hitbox));

        if let Some(command) = command {
            command();
        }
        id
    }

    /// Shared access; a stale id is a recoverable lookup miss
    pub fn get(&self, id: HitboxId) -> Option<&Hitbox> {
        let hitbox = self.slots.get(id.index()).and_then(Option::as_ref);
        if hitbox.is_none() {
            log::debug!("lookup of pruned hitbox {id:?}");
        }
        hitbox
    }

    /// Mutable access; a stale id is a recoverable lookup miss
    pub fn get_mut(&mut self, id: HitboxId) -> Option<&mut Hitbox> {
        let hitbox = self.slots.get_mut(id.index()).and_then(Option::as_mut);
        if hitbox.is_none() {
            log::debug!("lookup of pruned hitbox {id:?}");
        }
        hitbox
    }

    /// Flag a hitbox (in)active. Inactive boxes are skipped by every
    /// test immediately and removed from the lists on the next prune.
    pub fn set_active(&mut self, id: HitboxId, active: bool) {
        if let Some(hitbox) = self.get_mut(id) {
            hitbox.active = active;
        }
    }

    /// Move a hitbox's center to an absolute position
    pub fn set_center(&mut self, id: HitboxId, x: f32, y: f32) -> Result<()> {
        let viewport = self.viewport.clone();
        let hitbox = self.get_mut(id).ok_or(CollisionError::HitboxNotFound(id))?;
        hitbox.position.set(&viewport, x, y)?;
        Ok(())
    }

    /// Drop every inactive hitbox from the slots and all lists.
    /// Idempotent: pruning twice without an intervening deactivation is
    /// a no-op the second time.
    pub fn prune(&mut self) {
        for slot in self.slots.iter_mut() {
            if slot.as_ref().is_some_and(|h| !h.active) {
                *slot = None;
            }
        }
        let slots = &self.slots;
        let live = |id: &HitboxId| slots[id.index()].is_some();
        self.order.retain(live);
        self.collision.retain(live);
        self.combat.retain(live);
    }

    /// Absolute AABB overlap test between two registered boxes
    pub fn overlaps(&self, a: HitboxId, b: HitboxId) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(ha), Some(hb)) => ha
                .aabb(&self.viewport)
                .overlaps(&hb.aabb(&self.viewport)),
            _ => false,
        }
    }

    /// Would `id`, centered at `candidate`, overlap any other active
    /// blocking box it doesn't share an owner with? The per-axis
    /// movement query.
    pub fn blocked_at(&self, id: HitboxId, candidate: [f32; 2]) -> bool {
        let Some(moving) = self.get(id) else {
            return false;
        };
        if !moving.active {
            return false;
        }
        let probe = moving.aabb_at(&self.viewport, candidate);
        for &other_id in &self.collision {
            if other_id == id {
                continue;
            }
            let Some(other) = self.slots[other_id.index()].as_ref() else {
                continue;
            };
            if !other.active {
                continue;
            }
            if moving.owner.is_some() && moving.owner == other.owner {
                continue;
            }
            if probe.overlaps(&other.aabb(&self.viewport)) {
                return true;
            }
        }
        false
    }

    /// Test every overlapping pair and fire the callbacks.
    ///
    /// Blocking boxes are tested against each other; non-blocking boxes
    /// (combat and trigger zones) are tested against the blocking bodies
    /// moving through them. Each box's callback fires once per
    /// overlapping pair per tick, in registration order. Returns the
    /// collected events for world-level reactions.
    pub fn resolve(&mut self, time: f64) -> Vec<OverlapEvent> {
        let mut events = Vec::new();

        for &a in &self.order {
            let Some(box_a) = self.slots[a.index()].as_ref() else {
                continue;
            };
            if !box_a.active {
                continue;
            }
            let aabb_a = box_a.aabb(&self.viewport);
            for &b in &self.collision {
                if a == b {
                    continue;
                }
                let Some(box_b) = self.slots[b.index()].as_ref() else {
                    continue;
                };
                if !box_b.active {
                    continue;
                }
                if box_a.owner.is_some() && box_a.owner == box_b.owner {
                    continue;
                }
                if aabb_a.overlaps(&box_b.aabb(&self.viewport)) {
                    events.push(OverlapEvent {
                        this: a,
                        other: b,
                        this_owner: box_a.owner,
                        other_owner: box_b.owner,
                        other_tags: box_b.tags,
                        time,
                    });
                }
            }
        }

        for event in &events {
            // Take the callback out so the event borrow stays shared
            let taken = self.slots[event.this.index()]
                .as_mut()
                .and_then(|h| h.active.then(|| h.on_overlap.take()).flatten());
            if let Some(mut callback) = taken {
                callback(event);
                if let Some(hitbox) = self.slots[event.this.index()].as_mut() {
                    hitbox.on_overlap = Some(callback);
                }
            }
        }

        events
    }

    /// Live blocking-box ids in registration order
    pub fn collision_ids(&self) -> &[HitboxId] {
        &self.collision
    }

    /// Live combat-box ids in registration order
    pub fn combat_ids(&self) -> &[HitboxId] {
        &self.combat
    }

    /// Total live hitbox count
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry holds no live hitboxes
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
