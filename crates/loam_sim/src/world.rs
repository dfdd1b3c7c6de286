//! The world: explicit simulation context and the tick pipeline
//!
//! Everything the simulation owns lives here: viewport, hitbox
//! registry, mobs, projectiles, the command scheduler and the host
//! hooks. One `tick` runs the whole fixed order: commands, pruning,
//! overlay short-circuit, mob updates, projectiles, collision
//! resolution, effects.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use loam_collision::{Hitbox, HitboxId, HitboxRegistry, OverlapEvent};
use loam_combat::{Damage, Projectile};
use loam_core::{tags, EntityId, MapId};
use loam_scale::Viewport;

use crate::error::Result;
use crate::interfaces::{OverlayHook, TargetProvider, TilesetResolver};
use crate::mob::{build_preset, Mob, MobKind, MobRecord};
use crate::save::SaveGame;
use crate::scheduler::CommandScheduler;

/// Default on-screen tile size when no resolver is attached
pub const DEFAULT_TILE_SIZE: f32 = 128.0;

/// Called at the end of every tick with the overlap events it produced
pub type EffectHook = Box<dyn FnMut(f64, &[OverlapEvent]) + Send>;

/// What a trigger zone does when the player steps in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoneAction {
    /// Move the player within `map`
    Teleport { map: MapId, dest: [f32; 2] },
    /// Switch the active map and place the player there
    Switch {
        from: MapId,
        to: MapId,
        dest: [f32; 2],
    },
}

/// The simulation context
pub struct World {
    viewport: Viewport,
    pub registry: HitboxRegistry,
    pub mobs: Vec<Mob>,
    pub projectiles: Vec<Projectile>,
    scheduler: CommandScheduler<World>,
    target: Option<Box<dyn TargetProvider>>,
    overlay: Option<Box<dyn OverlayHook>>,
    effect_hook: Option<EffectHook>,
    zone_actions: HashMap<HitboxId, ZoneAction>,
    tilesets: Option<Box<dyn TilesetResolver>>,
    pub current_map: MapId,
    tile_size: f32,
}

impl World {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            registry: HitboxRegistry::new(viewport.clone()),
            viewport,
            mobs: Vec::new(),
            projectiles: Vec::new(),
            scheduler: CommandScheduler::new(),
            target: None,
            overlay: None,
            effect_hook: None,
            zone_actions: HashMap::new(),
            tilesets: None,
            current_map: MapId(0),
            tile_size: DEFAULT_TILE_SIZE,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Attach the tracked-target interface, usually the player
    pub fn set_target(&mut self, target: Box<dyn TargetProvider>) {
        self.target = Some(target);
    }

    /// Attach a modal overlay; while active, ticks update only it
    pub fn set_overlay(&mut self, overlay: Box<dyn OverlayHook>) {
        self.overlay = Some(overlay);
    }

    pub fn clear_overlay(&mut self) {
        self.overlay = None;
    }

    /// Attach the end-of-tick effect hook
    pub fn set_effect_hook(&mut self, hook: EffectHook) {
        self.effect_hook = Some(hook);
    }

    /// Attach a tileset resolver; preset spawns look their tile size up
    /// by mob kind, falling back to the world default
    pub fn set_tilesets(&mut self, tilesets: Box<dyn TilesetResolver>) {
        self.tilesets = Some(tilesets);
    }

    pub fn set_tile_size(&mut self, tile_size: f32) {
        self.tile_size = tile_size;
    }

    /// The tracked target's position on the active map
    pub fn target_position(&self) -> Option<[f32; 2]> {
        self.target
            .as_ref()
            .and_then(|t| t.position(self.current_map))
    }

    /// Queue a deferred world mutation
    pub fn schedule<F>(&mut self, command: F, delay_ticks: u32)
    where
        F: FnOnce(&mut World) + Send + 'static,
    {
        self.scheduler.schedule(command, delay_ticks);
    }

    fn tile_for(&self, kind: MobKind) -> f32 {
        self.tilesets
            .as_ref()
            .and_then(|t| t.tile_size(kind.as_str()))
            .unwrap_or(self.tile_size)
    }

    /// Spawn a preset mob at world coordinates
    pub fn spawn_mob(&mut self, kind: MobKind, map: MapId, x: f32, y: f32) -> Result<EntityId> {
        let tile = self.tile_for(kind);
        let mob = build_preset(&mut self.registry, kind, map, x, y, tile, None)?;
        let id = mob.entity.id;
        log::debug!("spawned {} {} at ({x}, {y})", kind.as_str(), id);
        self.mobs.push(mob);
        Ok(id)
    }

    /// Respawn a mob from a saved record
    pub fn spawn_record(&mut self, record: MobRecord) -> Result<EntityId> {
        let tile = self.tile_for(record.kind);
        let mob = build_preset(
            &mut self.registry,
            record.kind,
            MapId(record.map),
            record.x,
            record.y,
            tile,
            record.health,
        )?;
        let id = mob.entity.id;
        self.mobs.push(mob);
        Ok(id)
    }

    pub fn mob(&self, id: EntityId) -> Option<&Mob> {
        self.mobs.iter().find(|m| m.entity.id == id)
    }

    pub fn mob_mut(&mut self, id: EntityId) -> Option<&mut Mob> {
        self.mobs.iter_mut().find(|m| m.entity.id == id)
    }

    /// Register a trigger zone with a player-gated action. Returns the
    /// zone's hitbox id; non-player overlaps are ignored.
    pub fn add_zone(
        &mut self,
        center: [f32; 2],
        size: [f32; 2],
        action: ZoneAction,
    ) -> Result<HitboxId> {
        let hitbox = Hitbox::trigger(&self.viewport, center[0], center[1], size[0], size[1])?;
        let id = self.registry.register(hitbox);
        self.zone_actions.insert(id, action);
        Ok(id)
    }

    /// Run one simulation tick at simulated time `time` (ms)
    pub fn tick(&mut self, time: f64) -> Result<()> {
        // 1. due commands
        for command in self.scheduler.drain_due() {
            command(self);
        }

        // 2. prune
        self.registry.prune();
        self.mobs.retain(|m| m.entity.active);
        self.projectiles.retain(|p| p.active);

        // 3. overlay short-circuit
        if let Some(overlay) = self.overlay.as_mut() {
            if overlay.active() {
                overlay.update(time);
                return Ok(());
            }
        }

        // 4. mob updates, isolated per mob
        let target = self
            .target
            .as_ref()
            .and_then(|t| t.position(self.current_map));
        {
            let registry = &mut self.registry;
            let projectiles = &mut self.projectiles;
            let current_map = self.current_map;
            for mob in self.mobs.iter_mut() {
                if mob.entity.map != current_map {
                    continue;
                }
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    mob.update(time, registry, target, projectiles)
                }));
                match outcome {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        log::error!("mob {} update failed: {err}", mob.entity.id);
                    }
                    Err(_) => {
                        log::error!("mob {} update panicked, skipped this tick", mob.entity.id);
                    }
                }
            }
        }

        // 5. projectiles
        self.update_projectiles(time)?;

        // 6. collision resolution
        let events = self.registry.resolve(time);
        self.apply_zone_actions(&events);

        // 7. timed effects
        if let Some(hook) = self.effect_hook.as_mut() {
            hook(time, &events);
        }
        Ok(())
    }

    fn update_projectiles(&mut self, time: f64) -> Result<()> {
        let viewport = self.viewport.clone();
        let mut hits: Vec<(EntityId, Damage)> = Vec::new();

        for projectile in self.projectiles.iter_mut() {
            if !projectile.active {
                continue;
            }
            projectile.advance(&viewport)?;
            if projectile.expired(time) {
                projectile.active = false;
                continue;
            }
            for &combat_id in self.registry.combat_ids() {
                let Some(hitbox) = self.registry.get(combat_id) else {
                    continue;
                };
                if !hitbox.active || hitbox.owner == projectile.owner {
                    continue;
                }
                if projectile.hits(&viewport, &hitbox.aabb(&viewport)) {
                    if let Some(owner) = hitbox.owner {
                        hits.push((owner, projectile.damage()));
                    }
                    projectile.active = false;
                    break;
                }
            }
        }

        for (owner, damage) in hits {
            if let Some(mob) = self.mob_mut(owner) {
                mob.entity.take_damage(&damage);
            }
        }
        Ok(())
    }

    /// Turn zone overlaps into scheduled commands. Only player-tagged
    /// bodies trigger zones, and only on the active map.
    fn apply_zone_actions(&mut self, events: &[OverlapEvent]) {
        for event in events {
            if !tags::has(event.other_tags, tags::PLAYER) {
                continue;
            }
            let Some(action) = self.zone_actions.get(&event.this).copied() else {
                continue;
            };
            match action {
                ZoneAction::Teleport { map, dest } if map == self.current_map => {
                    self.scheduler.schedule(
                        move |world: &mut World| {
                            if let Some(target) = world.target.as_mut() {
                                target.teleport(map, dest);
                            }
                        },
                        0,
                    );
                }
                ZoneAction::Switch { from, to, dest } if from == self.current_map => {
                    self.scheduler.schedule(
                        move |world: &mut World| {
                            world.current_map = to;
                            if let Some(target) = world.target.as_mut() {
                                target.teleport(to, dest);
                            }
                        },
                        0,
                    );
                }
                _ => {}
            }
        }
    }

    /// Snapshot the save-relevant state
    pub fn capture_save(&self) -> SaveGame {
        let player = self.target_position().unwrap_or([0.0, 0.0]);
        SaveGame {
            current_map: self.current_map.0,
            player_x: player[0],
            player_y: player[1],
            viewport_width: self.viewport.width(),
            mobs: self
                .mobs
                .iter()
                .filter(|m| m.entity.active)
                .map(|m| m.record(&self.viewport))
                .collect(),
        }
    }

    /// Rebuild mobs and the active map from a save; the player is
    /// moved through the target interface
    pub fn restore_save(&mut self, save: &SaveGame) -> Result<()> {
        self.current_map = MapId(save.current_map);
        for record in &save.mobs {
            self.spawn_record(*record)?;
        }
        if let Some(target) = self.target.as_mut() {
            target.teleport(MapId(save.current_map), [save.player_x, save.player_y]);
        }
        Ok(())
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("current_map", &self.current_map)
            .field("mobs", &self.mobs.len())
            .field("projectiles", &self.projectiles.len())
            .field("hitboxes", &self.registry.len())
            .finish_non_exhaustive()
    }
}
