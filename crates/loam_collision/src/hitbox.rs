//! Hitbox geometry and flags

use crate::events::{CommandCallback, OverlapCallback, OverlapEvent};
use loam_core::EntityId;
use loam_scale::{ScaleError, ScaledPoint, Viewport};

/// Absolute axis-aligned bounding box (min, max corners)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Aabb {
    /// Overlap test; touching edges do not count as overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min[0] < other.max[0]
            && self.max[0] > other.min[0]
            && self.min[1] < other.max[1]
            && self.max[1] > other.min[1]
    }

    /// Containment test for a point
    pub fn contains(&self, point: [f32; 2]) -> bool {
        point[0] >= self.min[0]
            && point[0] <= self.max[0]
            && point[1] >= self.min[1]
            && point[1] <= self.max[1]
    }
}

/// An axis-aligned box that blocks movement, detects combat overlap, or
/// fires an interaction trigger, depending on its flags.
pub struct Hitbox {
    /// Center position in world space
    pub position: ScaledPoint,
    /// Full width/height
    pub size: ScaledPoint,
    /// Blocks movement and participates in collision resolution
    pub is_collision: bool,
    /// Used for attack/combat detection
    pub is_combat: bool,
    /// Inactive boxes are skipped by every test and pruned next tick
    pub active: bool,
    /// Owning entity; None for scenery and standalone trigger zones
    pub owner: Option<EntityId>,
    /// Tag bits exposed to the other side's callback
    pub tags: u32,
    pub(crate) on_overlap: Option<OverlapCallback>,
    pub(crate) command: Option<CommandCallback>,
}

impl Hitbox {
    fn with_flags(
        viewport: &Viewport,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        is_collision: bool,
        is_combat: bool,
    ) -> Result<Self, ScaleError> {
        Ok(Self {
            position: ScaledPoint::new(viewport, x, y)?,
            size: ScaledPoint::new(viewport, width, height)?,
            is_collision,
            is_combat,
            active: true,
            owner: None,
            tags: 0,
            on_overlap: None,
            command: None,
        })
    }

    /// A movement-blocking collision box
    pub fn blocking(
        viewport: &Viewport,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<Self, ScaleError> {
        Self::with_flags(viewport, x, y, width, height, true, false)
    }

    /// A combat detection box (non-blocking)
    pub fn combat(
        viewport: &Viewport,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<Self, ScaleError> {
        Self::with_flags(viewport, x, y, width, height, false, true)
    }

    /// A trigger-only zone: neither blocking nor combat, pure callback
    pub fn trigger(
        viewport: &Viewport,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<Self, ScaleError> {
        Self::with_flags(viewport, x, y, width, height, false, false)
    }

    /// Set the owning entity
    pub fn with_owner(mut self, owner: EntityId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set tag bits
    pub fn with_tags(mut self, tags: u32) -> Self {
        self.tags = tags;
        self
    }

    /// Set the overlap callback
    pub fn on_overlap<F>(mut self, f: F) -> Self
    where
        F: FnMut(&OverlapEvent) + Send + 'static,
    {
        self.on_overlap = Some(Box::new(f));
        self
    }

    /// Set the one-shot command fired at registration
    pub fn with_command<F>(mut self, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.command = Some(Box::new(f));
        self
    }

    /// Absolute bounding box at the current viewport extent
    pub fn aabb(&self, viewport: &Viewport) -> Aabb {
        let [cx, cy] = self.position.get(viewport);
        let [w, h] = self.size.get(viewport);
        Aabb {
            min: [cx - w / 2.0, cy - h / 2.0],
            max: [cx + w / 2.0, cy + h / 2.0],
        }
    }

    /// Absolute bounding box as if centered at `center`
    pub fn aabb_at(&self, viewport: &Viewport, center: [f32; 2]) -> Aabb {
        let [w, h] = self.size.get(viewport);
        Aabb {
            min: [center[0] - w / 2.0, center[1] - h / 2.0],
            max: [center[0] + w / 2.0, center[1] + h / 2.0],
        }
    }

    /// Half extents in absolute pixels
    pub fn half_extents(&self, viewport: &Viewport) -> [f32; 2] {
        let [w, h] = self.size.get(viewport);
        [w / 2.0, h / 2.0]
    }
}

impl std::fmt::Debug for Hitbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hitbox")
            .field("is_collision", &self.is_collision)
            .field("is_combat", &self.is_combat)
            .field("active", &self.active)
            .field("owner", &self.owner)
            .field("tags", &self.tags)
            .field("has_callback", &self.on_overlap.is_some())
            .finish()
    }
}
