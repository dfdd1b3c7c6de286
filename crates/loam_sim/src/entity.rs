//! Entity base: a body with two hitboxes
//!
//! An entity is a position, a per-tick velocity, a blocking box and a
//! combat box, each with its own offset from the body center. Movement
//! is resolved per axis so sliding along a wall works: a blocked X step
//! reverts X but leaves Y free.

use crate::error::Result;
use loam_collision::{Hitbox, HitboxId, HitboxRegistry};
use loam_combat::{Damage, Health};
use loam_core::{EntityId, MapId};
use loam_scale::{ScaledPoint, Viewport};

use loam_ai::AnimState;

/// Geometry of one hitbox relative to the body center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxDesc {
    pub width: f32,
    pub height: f32,
    /// Offset of the box center from the body center
    pub offset: [f32; 2],
}

impl BoxDesc {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset: [0.0, 0.0],
        }
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = [x, y];
        self
    }
}

/// A simulated body
#[derive(Debug)]
pub struct Entity {
    pub id: EntityId,
    pub map: MapId,
    position: ScaledPoint,
    velocity: ScaledPoint,
    pub collision_box: HitboxId,
    pub combat_box: HitboxId,
    collision_offset: ScaledPoint,
    combat_offset: ScaledPoint,
    pub health: Health,
    pub anim_state: AnimState,
    pub active: bool,
}

impl Entity {
    /// Register both hitboxes and build the entity at `(x, y)`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: &mut HitboxRegistry,
        map: MapId,
        x: f32,
        y: f32,
        collision: BoxDesc,
        combat: BoxDesc,
        health: Health,
        tags: u32,
    ) -> Result<Self> {
        let viewport = registry.viewport().clone();
        let id = EntityId::next();

        let collision_box = registry.register(
            Hitbox::blocking(
                &viewport,
                x + collision.offset[0],
                y + collision.offset[1],
                collision.width,
                collision.height,
            )?
            .with_owner(id)
            .with_tags(tags),
        );
        let combat_box = registry.register(
            Hitbox::combat(
                &viewport,
                x + combat.offset[0],
                y + combat.offset[1],
                combat.width,
                combat.height,
            )?
            .with_owner(id)
            .with_tags(tags),
        );

        Ok(Self {
            id,
            map,
            position: ScaledPoint::new(&viewport, x, y)?,
            velocity: ScaledPoint::zero(),
            collision_box,
            combat_box,
            collision_offset: ScaledPoint::new(
                &viewport,
                collision.offset[0],
                collision.offset[1],
            )?,
            combat_offset: ScaledPoint::new(&viewport, combat.offset[0], combat.offset[1])?,
            health,
            anim_state: AnimState::Idle,
            active: true,
        })
    }

    /// Absolute body center
    pub fn position(&self, viewport: &Viewport) -> [f32; 2] {
        self.position.get(viewport)
    }

    /// Per-tick velocity in absolute pixels
    pub fn set_velocity(&mut self, viewport: &Viewport, vx: f32, vy: f32) -> Result<()> {
        self.velocity.set(viewport, vx, vy)?;
        Ok(())
    }

    /// Teleport, syncing both hitboxes
    pub fn set_position(&mut self, registry: &mut HitboxRegistry, x: f32, y: f32) -> Result<()> {
        let viewport = registry.viewport().clone();
        self.position.set(&viewport, x, y)?;
        self.sync_boxes(registry)
    }

    /// Half sizes of the blocking box, for arrival thresholds
    pub fn collision_half_extents(&self, registry: &HitboxRegistry) -> [f32; 2] {
        registry
            .get(self.collision_box)
            .map(|h| h.half_extents(registry.viewport()))
            .unwrap_or([0.0, 0.0])
    }

    pub fn take_damage(&mut self, damage: &Damage) {
        self.health.apply(damage);
    }

    /// Deactivate the body and both hitboxes. The registry prunes them
    /// on the next tick.
    pub fn destroy(&mut self, registry: &mut HitboxRegistry) {
        log::debug!("destroying {}", self.id);
        self.active = false;
        registry.set_active(self.collision_box, false);
        registry.set_active(self.combat_box, false);
    }

    /// Run one tick of physical update. Returns `false` when the
    /// entity died at the top of the tick and was destroyed.
    pub fn update(&mut self, registry: &mut HitboxRegistry) -> Result<bool> {
        if self.health.is_dead() {
            self.destroy(registry);
            return Ok(false);
        }
        if !self.active {
            return Ok(false);
        }
        self.apply_movement(registry)?;
        Ok(true)
    }

    /// Per-axis move-and-revert against blocking boxes
    fn apply_movement(&mut self, registry: &mut HitboxRegistry) -> Result<()> {
        let viewport = registry.viewport().clone();
        let [x, y] = self.position.get(&viewport);
        let [vx, vy] = self.velocity.get(&viewport);
        let [ox, oy] = self.collision_offset.get(&viewport);

        let mut next_x = x + vx;
        if vx != 0.0 && registry.blocked_at(self.collision_box, [next_x + ox, y + oy]) {
            next_x = x;
        }
        let mut next_y = y + vy;
        if vy != 0.0 && registry.blocked_at(self.collision_box, [next_x + ox, next_y + oy]) {
            next_y = y;
        }

        self.position.set(&viewport, next_x, next_y)?;
        self.sync_boxes(registry)
    }

    fn sync_boxes(&mut self, registry: &mut HitboxRegistry) -> Result<()> {
        let viewport = registry.viewport().clone();
        let [x, y] = self.position.get(&viewport);
        let [ox, oy] = self.collision_offset.get(&viewport);
        registry.set_center(self.collision_box, x + ox, y + oy)?;
        let [cx, cy] = self.combat_offset.get(&viewport);
        registry.set_center(self.combat_box, x + cx, y + cy)?;
        Ok(())
    }
}
