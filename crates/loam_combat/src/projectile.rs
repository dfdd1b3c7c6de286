//! Projectile spec and runtime
//!
//! Projectiles are simple: a square body flying at constant velocity
//! until it hits a combat box or its lifetime runs out. The world owns
//! the list and applies the damage; a projectile only knows how to
//! advance and test itself.

use crate::damage::Damage;
use loam_collision::Aabb;
use loam_core::EntityId;
use loam_scale::{Axis, Scaled, ScaleError, ScaledPoint, Viewport};
use serde::{Deserialize, Serialize};

/// Static tuning for one kind of projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpec {
    /// Side of the square body
    pub size: Scaled,
    /// Milliseconds of flight before expiry
    pub lifetime_ms: f64,
    /// Hit points removed on impact
    pub damage: i32,
}

impl ProjectileSpec {
    pub fn new(viewport: &Viewport, size: f32, lifetime_ms: f64, damage: i32) -> Result<Self, ScaleError> {
        Ok(Self {
            size: Scaled::new(viewport, Axis::X, size)?,
            lifetime_ms,
            damage,
        })
    }
}

/// A projectile in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    spec: ProjectileSpec,
    /// Shooter, exempt from the hit test
    pub owner: Option<EntityId>,
    position: ScaledPoint,
    velocity: ScaledPoint,
    spawn_time: f64,
    pub active: bool,
}

impl Projectile {
    /// Launch from `position` (center) with a per-tick `velocity`
    pub fn new(
        viewport: &Viewport,
        spec: ProjectileSpec,
        owner: Option<EntityId>,
        position: [f32; 2],
        velocity: [f32; 2],
        time: f64,
    ) -> Result<Self, ScaleError> {
        Ok(Self {
            spec,
            owner,
            position: ScaledPoint::new(viewport, position[0], position[1])?,
            velocity: ScaledPoint::new(viewport, velocity[0], velocity[1])?,
            spawn_time: time,
            active: true,
        })
    }

    /// Advance one tick
    pub fn advance(&mut self, viewport: &Viewport) -> Result<(), ScaleError> {
        let [x, y] = self.position.get(viewport);
        let [vx, vy] = self.velocity.get(viewport);
        self.position.set(viewport, x + vx, y + vy)
    }

    /// Whether the lifetime has run out at `time`
    pub fn expired(&self, time: f64) -> bool {
        time - self.spawn_time >= self.spec.lifetime_ms
    }

    /// Current center position
    pub fn position(&self, viewport: &Viewport) -> [f32; 2] {
        self.position.get(viewport)
    }

    /// Body bounds at the current position
    pub fn aabb(&self, viewport: &Viewport) -> Aabb {
        let [x, y] = self.position.get(viewport);
        let half = self.spec.size.get(viewport) / 2.0;
        Aabb {
            min: [x - half, y - half],
            max: [x + half, y + half],
        }
    }

    /// Overlap test against a combat box in absolute coordinates
    pub fn hits(&self, viewport: &Viewport, target: &Aabb) -> bool {
        self.active && self.aabb(viewport).overlaps(target)
    }

    /// The damage this projectile deals, attributed to its shooter
    pub fn damage(&self) -> Damage {
        Damage::new(self.spec.damage, self.owner)
    }
}
