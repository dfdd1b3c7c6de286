//! Mobs: an entity driven by a brain, plus the stock presets
//!
//! The attack hook is the seam between the brain's "attack now"
//! decision and whatever the attack actually is. The base hook is a
//! no-op; the stalker preset spawns a projectile through it.

use crate::entity::{BoxDesc, Entity};
use crate::error::Result;
use loam_ai::{AiDescriptor, MobBrain};
use loam_collision::HitboxRegistry;
use loam_combat::{Health, Projectile, ProjectileSpec};
use loam_core::{tags, EntityId, MapId};
use loam_scale::Viewport;
use serde::{Deserialize, Serialize};

/// Everything an attack hook may touch when it fires
pub struct AttackContext<'a> {
    pub time: f64,
    pub viewport: &'a Viewport,
    pub shooter: EntityId,
    /// Shooter's body center
    pub position: [f32; 2],
    /// Tracked target's position, always present when an attack fires
    pub target: [f32; 2],
    pub projectiles: &'a mut Vec<Projectile>,
}

/// Reaction to the brain's attack decision
pub type AttackHook = Box<dyn FnMut(&mut AttackContext<'_>) -> Result<()> + Send>;

/// The stock mob presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MobKind {
    /// Harmless roamer
    Wanderer,
    /// Harmless but massive, a moving obstacle
    Brute,
    /// Middle-ranged hunter with a projectile attack
    Stalker,
}

impl MobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MobKind::Wanderer => "wanderer",
            MobKind::Brute => "brute",
            MobKind::Stalker => "stalker",
        }
    }
}

impl std::str::FromStr for MobKind {
    type Err = crate::error::SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wanderer" => Ok(MobKind::Wanderer),
            "brute" => Ok(MobKind::Brute),
            "stalker" => Ok(MobKind::Stalker),
            other => Err(crate::error::SimError::UnknownMobKind(other.to_string())),
        }
    }
}

/// Serializable snapshot of one mob, enough to respawn it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MobRecord {
    pub kind: MobKind,
    pub x: f32,
    pub y: f32,
    pub map: u32,
    /// `None` for invulnerable mobs
    pub health: Option<i32>,
}

/// An entity with a brain
pub struct Mob {
    pub entity: Entity,
    pub brain: MobBrain,
    pub kind: MobKind,
    attack: Option<AttackHook>,
}

impl Mob {
    pub fn new(entity: Entity, brain: MobBrain, kind: MobKind) -> Self {
        Self {
            entity,
            brain,
            kind,
            attack: None,
        }
    }

    pub fn with_attack(mut self, hook: AttackHook) -> Self {
        self.attack = Some(hook);
        self
    }

    /// Snapshot for saving
    pub fn record(&self, viewport: &Viewport) -> MobRecord {
        let [x, y] = self.entity.position(viewport);
        MobRecord {
            kind: self.kind,
            x,
            y,
            map: self.entity.map.0,
            health: self.entity.health.points(),
        }
    }

    /// One full tick: death check, behavior, movement, attack.
    pub fn update(
        &mut self,
        time: f64,
        registry: &mut HitboxRegistry,
        target: Option<[f32; 2]>,
        projectiles: &mut Vec<Projectile>,
    ) -> Result<()> {
        if self.entity.health.is_dead() {
            self.entity.destroy(registry);
            return Ok(());
        }
        let viewport = registry.viewport().clone();
        let position = self.entity.position(&viewport);
        let half_extents = self.entity.collision_half_extents(registry);

        let out = self
            .brain
            .update(time, &viewport, position, target, half_extents)?;
        self.entity
            .set_velocity(&viewport, out.velocity[0], out.velocity[1])?;
        self.entity.anim_state = out.anim_state;

        if !self.entity.update(registry)? {
            return Ok(());
        }

        if out.attack {
            if let (Some(hook), Some(target)) = (self.attack.as_mut(), target) {
                let mut ctx = AttackContext {
                    time,
                    viewport: &viewport,
                    shooter: self.entity.id,
                    position: self.entity.position(&viewport),
                    target,
                    projectiles,
                };
                hook(&mut ctx)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Mob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mob")
            .field("kind", &self.kind)
            .field("entity", &self.entity.id)
            .field("brain", &self.brain)
            .finish_non_exhaustive()
    }
}

/// Build a preset mob at `(x, y)`. `tile` is the on-screen tile size
/// the tuning scales from; `health` overrides the preset's starting
/// points when restoring from a save.
pub fn build_preset(
    registry: &mut HitboxRegistry,
    kind: MobKind,
    map: MapId,
    x: f32,
    y: f32,
    tile: f32,
    health: Option<i32>,
) -> Result<Mob> {
    let viewport = registry.viewport().clone();
    match kind {
        MobKind::Wanderer => {
            let entity = Entity::new(
                registry,
                map,
                x,
                y,
                BoxDesc::new(tile * 0.40625, tile * 0.25)
                    .with_offset(tile * 0.015625, tile * 0.0625),
                BoxDesc::new(tile * 0.40625, tile * 0.25)
                    .with_offset(tile * 0.015625, tile * 0.0625),
                Health::new(health.unwrap_or(5)),
                tags::MOB,
            )?;
            let config = AiDescriptor::new()
                .set_wandering(&viewport, tile / 35.0, tile * 2.0, 3000.0)?
                .build()?;
            let brain = MobBrain::new(config, entity_seed(&entity));
            Ok(Mob::new(entity, brain, kind))
        }
        MobKind::Brute => {
            let entity = Entity::new(
                registry,
                map,
                x,
                y,
                BoxDesc::new(tile * 2.5, tile * 2.5),
                BoxDesc::new(tile * 3.0, tile * 3.0),
                Health::new(health.unwrap_or(100)),
                tags::MOB,
            )?;
            let config = AiDescriptor::new()
                .set_wandering(&viewport, tile / 35.0, tile * 2.0, 3000.0)?
                .build()?;
            let brain = MobBrain::new(config, entity_seed(&entity));
            Ok(Mob::new(entity, brain, kind))
        }
        MobKind::Stalker => {
            let offset_y = -0.15625 * tile;
            let entity = Entity::new(
                registry,
                map,
                x,
                y,
                BoxDesc::new(tile * 2.0, tile * 2.5).with_offset(0.0, offset_y),
                BoxDesc::new(tile * 2.0, tile * 2.5).with_offset(0.0, offset_y),
                Health::new(health.unwrap_or(10)),
                tags::MOB,
            )?;
            let config = AiDescriptor::new()
                .set_wandering(&viewport, tile * 0.04, tile / 64.0, 1000.0)?
                .set_middle_ranged(
                    &viewport,
                    tile * 10.0,
                    tile * 0.04,
                    10_000.0,
                    4,
                    tile * 0.02,
                    tile * 4.5,
                    2000.0,
                )?
                .set_attack(&viewport, 2000.0, tile * 8.0, tile * 0.23)?
                .build()?;
            let brain = MobBrain::new(config, entity_seed(&entity));

            let spec = ProjectileSpec::new(&viewport, tile / 2.0, 2000.0, 2)?;
            let attack_range = brain
                .config()
                .attack
                .map(|a| a.range)
                .unwrap_or(loam_scale::Scaled::zero(loam_scale::Axis::X));
            let projectile_speed = brain
                .config()
                .attack
                .map(|a| a.projectile_speed)
                .unwrap_or(loam_scale::Scaled::zero(loam_scale::Axis::X));

            let hook: AttackHook = Box::new(move |ctx| {
                let dx = ctx.target[0] - ctx.position[0];
                let dy = ctx.target[1] - ctx.position[1];
                let distance = dx.hypot(dy).max(1.0);
                if distance > attack_range.get(ctx.viewport) {
                    return Ok(());
                }
                let speed = projectile_speed.get(ctx.viewport);
                let projectile = Projectile::new(
                    ctx.viewport,
                    spec,
                    Some(ctx.shooter),
                    ctx.position,
                    [dx / distance * speed, dy / distance * speed],
                    ctx.time,
                )?;
                ctx.projectiles.push(projectile);
                Ok(())
            });
            Ok(Mob::new(entity, brain, kind).with_attack(hook))
        }
    }
}

fn entity_seed(entity: &Entity) -> u64 {
    entity.id.raw()
}
