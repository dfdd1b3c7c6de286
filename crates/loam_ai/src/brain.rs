//! The per-mob behavior runtime
//!
//! A `MobBrain` owns the timers and randomness behind one mob's
//! decisions. Each tick the simulation feeds it the clock, the mob's
//! own position and the tracked target's, and gets back a velocity, an
//! attack decision and the two state readouts. The brain never moves
//! anything itself.

use crate::behavior::{select_behavior, Behavior, CapabilityFlags};
use crate::descriptor::{AiConfig, LongRangeParams, RusherParams};
use crate::state::{AiState, AnimState};
use loam_scale::{ScaleError, ScaledPoint, Viewport};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

/// Eight compass headings, 45 degrees apart
const WANDER_HEADINGS: usize = 8;

/// What the brain decided this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrainOutput {
    /// Absolute velocity in pixels per tick
    pub velocity: [f32; 2],
    /// Whether to attempt an attack this tick
    pub attack: bool,
    pub ai_state: AiState,
    pub anim_state: AnimState,
}

/// Behavior runtime for one mob
pub struct MobBrain {
    config: AiConfig,
    rng: SmallRng,
    ai_state: AiState,

    // wandering
    anchor: ScaledPoint,
    anchor_set: bool,
    heading: [f32; 2],
    last_direction_change: f64,
    walking: bool,
    phase_start: f64,
    phase_duration: f64,

    // attack and rush
    last_attack_time: f64,
    last_rush_time: f64,
    rush_pause_duration: f64,
    rush_attacks_done: u32,
    dash_start: f64,

    // long-range circling
    circle_direction: f32,
    circle_last_flip: f64,
    circle_flip_pause: f64,
    attack_pause: f64,
}

impl MobBrain {
    /// Build a brain from a validated config. `seed` fixes every
    /// stochastic timer for reproducible runs.
    pub fn new(config: AiConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let phase_duration = 2000.0 + rng.random::<f64>() * 3000.0;
        let rush_pause_duration = config
            .rusher
            .map(|r| r.rush_cooldown_ms * rng.random::<f64>())
            .unwrap_or(0.0);
        let circle_flip_pause = config
            .long_range
            .map(|l| l.direction_change_cooldown_ms * rng.random::<f64>())
            .unwrap_or(0.0);
        let attack_pause = config
            .attack
            .map(|a| a.cooldown_ms * 2.0 * rng.random::<f64>())
            .unwrap_or(0.0);
        let still = config.wandering.speed.fraction() == 0.0;
        Self {
            config,
            rng,
            ai_state: if still { AiState::Still } else { AiState::Wandering },
            anchor: ScaledPoint::zero(),
            anchor_set: false,
            heading: [0.0, 0.0],
            last_direction_change: 0.0,
            walking: true,
            phase_start: 0.0,
            phase_duration,
            last_attack_time: 0.0,
            last_rush_time: 0.0,
            rush_pause_duration,
            rush_attacks_done: 0,
            dash_start: 0.0,
            circle_direction: 1.0,
            circle_last_flip: 0.0,
            circle_flip_pause,
            attack_pause,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn ai_state(&self) -> AiState {
        self.ai_state
    }

    /// Current randomized pause before the next rush may start
    pub fn rush_pause_duration(&self) -> f64 {
        self.rush_pause_duration
    }

    /// Run one tick of behavior.
    ///
    /// `target` is the tracked target's absolute position, `None` when
    /// nothing is tracked; `collision_half_extents` are the mob's own
    /// blocking-box half sizes, used for arrival thresholds.
    pub fn update(
        &mut self,
        time: f64,
        viewport: &Viewport,
        position: [f32; 2],
        target: Option<[f32; 2]>,
        collision_half_extents: [f32; 2],
    ) -> Result<BrainOutput, ScaleError> {
        let caps = CapabilityFlags::from(&self.config);

        if let (Some(follower), Some(target)) = (self.config.follower, target) {
            self.ai_state = AiState::Chasing;
            let speed = follower.chase_speed.get(viewport);
            return Ok(self.chase(time, position, target, collision_half_extents, speed));
        }

        if self.config.is_hostile() {
            if let Some(target) = target {
                let d = (target[0] - position[0]).hypot(target[1] - position[1]);
                let in_vision = self
                    .config
                    .vision_range()
                    .is_some_and(|v| d <= v.get(viewport));
                let rushing = self.ai_state == AiState::Rushing;
                let rush_ready = self.rush_ready(time, d, viewport);

                match select_behavior(caps, in_vision, rush_ready, rushing) {
                    Behavior::Rush => {
                        if let Some(rusher) = self.config.rusher {
                            if !rushing {
                                self.dash_start = time;
                                self.ai_state = AiState::Rushing;
                            }
                            return Ok(self.rush(
                                time,
                                viewport,
                                position,
                                target,
                                collision_half_extents,
                                rusher,
                            ));
                        }
                    }
                    Behavior::LongRange => {
                        if let Some(long_range) = self.config.long_range {
                            return Ok(self.kite(time, viewport, position, target, long_range));
                        }
                    }
                    Behavior::Chase => {
                        if let Some(rusher) = self.config.rusher {
                            self.ai_state = AiState::Chasing;
                            let speed = rusher.chase_speed.get(viewport);
                            return Ok(self.chase(
                                time,
                                position,
                                target,
                                collision_half_extents,
                                speed,
                            ));
                        }
                    }
                    Behavior::Wander => {}
                }
            }
        }

        self.wander(time, viewport, position)
    }

    /// Whether the rush cooldown has elapsed. Middle-ranged mobs rush
    /// at half the pause once the target is inside the activation
    /// range.
    fn rush_ready(&self, time: f64, distance: f32, viewport: &Viewport) -> bool {
        let Some(rusher) = self.config.rusher else {
            return false;
        };
        let since = time - self.last_rush_time;
        if since >= self.rush_pause_duration {
            return true;
        }
        self.config.long_range.is_some()
            && distance <= rusher.rush_activation_range.get(viewport)
            && since >= self.rush_pause_duration / 2.0
    }

    /// Move straight at the target, stopping inside the arrival
    /// threshold; attack on the base cooldown.
    fn chase(
        &mut self,
        time: f64,
        position: [f32; 2],
        target: [f32; 2],
        half_extents: [f32; 2],
        speed: f32,
    ) -> BrainOutput {
        let dx = target[0] - position[0];
        let dy = target[1] - position[1];
        let distance = dx.hypot(dy).floor();
        let threshold = half_extents[0].max(half_extents[1]) + 1.0;

        let velocity = if distance < threshold {
            [0.0, 0.0]
        } else {
            let n = distance.max(1.0);
            [dx / n * speed, dy / n * speed]
        };

        let mut attack = false;
        if let Some(params) = self.config.attack {
            if time - self.last_attack_time > params.cooldown_ms {
                attack = true;
                self.last_attack_time = time;
            }
        }

        BrainOutput {
            velocity,
            attack,
            ai_state: self.ai_state,
            anim_state: AnimState::Walk,
        }
    }

    /// Dash at the target for the dash window, then stand and burn the
    /// attack quota at a sixth of the base cooldown. Reaching the
    /// target zeroes the dash start so the window reads as elapsed.
    fn rush(
        &mut self,
        time: f64,
        viewport: &Viewport,
        position: [f32; 2],
        target: [f32; 2],
        half_extents: [f32; 2],
        rusher: RusherParams,
    ) -> BrainOutput {
        let dx = target[0] - position[0];
        let dy = target[1] - position[1];
        let distance = dx.hypot(dy);

        if distance < half_extents[0].max(half_extents[1]) + 1.0 {
            self.dash_start = 0.0;
        }

        if time - self.dash_start <= rusher.dash_duration_ms {
            let n = distance.max(1.0);
            let speed = rusher.dash_speed.get(viewport);
            return BrainOutput {
                velocity: [dx / n * speed, dy / n * speed],
                attack: false,
                ai_state: AiState::Rushing,
                anim_state: AnimState::Rushing,
            };
        }

        // Dash window over: stand still and work through the quota
        if self.rush_attacks_done == rusher.attacks_per_rush {
            self.last_rush_time = time;
            self.rush_attacks_done = 0;
            self.rush_pause_duration = rusher.rush_cooldown_ms * self.rng.random::<f64>();
            self.ai_state = AiState::Chasing;
            let speed = rusher.chase_speed.get(viewport);
            return self.chase(time, position, target, half_extents, speed);
        }

        let mut attack = false;
        if let Some(params) = self.config.attack {
            if time - self.last_attack_time > params.cooldown_ms / 6.0 {
                attack = true;
                self.rush_attacks_done += 1;
                self.last_attack_time = time;
            }
        }

        BrainOutput {
            velocity: [0.0, 0.0],
            attack,
            ai_state: AiState::Rushing,
            anim_state: AnimState::Idle,
        }
    }

    /// Hold the kiting distance: blend the radial vector (by how far
    /// off the preferred distance we are) with the tangential one, and
    /// flip the circling direction on a redrawn cooldown.
    fn kite(
        &mut self,
        time: f64,
        viewport: &Viewport,
        position: [f32; 2],
        target: [f32; 2],
        long_range: LongRangeParams,
    ) -> BrainOutput {
        self.ai_state = AiState::LongRangeAttacking;

        let dx = target[0] - position[0];
        let dy = target[1] - position[1];
        let distance = dx.hypot(dy).max(1.0);
        let speed = long_range.chase_speed.get(viewport);

        let radial = [dx / distance * speed, dy / distance * speed];
        let tangential = [
            radial[1] * self.circle_direction,
            -radial[0] * self.circle_direction,
        ];
        let kiting = long_range.kiting_distance.get(viewport);
        let coef = ((distance - kiting) / kiting).clamp(-1.0, 1.0);
        let velocity = [
            radial[0] * coef + tangential[0] * (1.0 - coef.abs()),
            radial[1] * coef + tangential[1] * (1.0 - coef.abs()),
        ];

        if time - self.circle_last_flip > self.circle_flip_pause {
            self.circle_direction = -self.circle_direction;
            self.circle_last_flip = time;
            self.circle_flip_pause =
                long_range.direction_change_cooldown_ms * self.rng.random::<f64>();
        }

        let mut attack = false;
        if let Some(params) = self.config.attack {
            if time - self.last_attack_time > self.attack_pause {
                attack = true;
                self.attack_pause = params.cooldown_ms * 2.0 * self.rng.random::<f64>();
                self.last_attack_time = time;
            }
        }

        BrainOutput {
            velocity,
            attack,
            ai_state: AiState::LongRangeAttacking,
            anim_state: AnimState::Walk,
        }
    }

    /// Random walk around the anchor, alternating walk and idle phases
    /// with fresh duration draws. Entering the state re-anchors on the
    /// current position exactly once.
    fn wander(
        &mut self,
        time: f64,
        viewport: &Viewport,
        position: [f32; 2],
    ) -> Result<BrainOutput, ScaleError> {
        let params = self.config.wandering;
        let still = params.speed.fraction() == 0.0;

        let entering = !matches!(self.ai_state, AiState::Wandering | AiState::Still);
        if entering || !self.anchor_set {
            self.anchor.set(viewport, position[0], position[1])?;
            self.anchor_set = true;
            self.heading = [0.0, 0.0];
            self.ai_state = if still { AiState::Still } else { AiState::Wandering };
        }

        if still {
            return Ok(BrainOutput {
                velocity: [0.0, 0.0],
                attack: false,
                ai_state: AiState::Still,
                anim_state: AnimState::Idle,
            });
        }

        let speed = params.speed.get(viewport);
        let mut velocity = [0.0, 0.0];

        if self.walking {
            if time - self.phase_start >= self.phase_duration {
                self.walking = false;
                self.phase_start = time;
                self.phase_duration = 1500.0 + self.rng.random::<f64>() * 5000.0;
                self.heading = [0.0, 0.0];
            } else {
                if time - self.last_direction_change > params.direction_change_interval_ms {
                    self.redraw_heading(time);
                }
                velocity = [self.heading[0] * speed, self.heading[1] * speed];

                // Anchor containment kicks in at 70% of the radius and
                // overrides the heading outright
                let [ax, ay] = self.anchor.get(viewport);
                let off_x = position[0] - ax;
                let off_y = position[1] - ay;
                let off = off_x.hypot(off_y);
                if off > params.radius.get(viewport) * 0.7 {
                    let n = off.max(1.0);
                    velocity = [-off_x / n * speed, -off_y / n * speed];
                }
            }
        } else if time - self.phase_start >= self.phase_duration {
            self.walking = true;
            self.phase_start = time;
            self.phase_duration = 2000.0 + self.rng.random::<f64>() * 3000.0;
            self.redraw_heading(time);
            velocity = [self.heading[0] * speed, self.heading[1] * speed];
        }

        Ok(BrainOutput {
            velocity,
            attack: false,
            ai_state: AiState::Wandering,
            anim_state: if self.walking {
                AnimState::Walk
            } else {
                AnimState::Idle
            },
        })
    }

    fn redraw_heading(&mut self, time: f64) {
        let angle = self.rng.random_range(0..WANDER_HEADINGS) as f32 * (PI / 4.0);
        self.heading = [angle.cos(), angle.sin()];
        self.last_direction_change = time;
    }
}

impl std::fmt::Debug for MobBrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MobBrain")
            .field("ai_state", &self.ai_state)
            .field("walking", &self.walking)
            .field("rush_attacks_done", &self.rush_attacks_done)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::AiDescriptor;
    use approx::assert_relative_eq;

    const TICK_MS: f64 = 1000.0 / 128.0;
    const HALF: [f32; 2] = [13.0, 10.0];

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 800.0)
    }

    fn wanderer(viewport: &Viewport) -> AiConfig {
        AiDescriptor::new()
            .set_wandering(viewport, 2.0, 100.0, 1000.0)
            .unwrap()
            .build()
            .unwrap()
    }

    fn rusher(viewport: &Viewport) -> AiConfig {
        AiDescriptor::new()
            .set_wandering(viewport, 2.0, 100.0, 1000.0)
            .unwrap()
            .set_rusher(viewport, 300.0, 2.5, 10_000.0, 4)
            .unwrap()
            .set_attack(viewport, 2400.0, 250.0, 14.0)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_wander_stays_inside_radius() {
        let viewport = viewport();
        let mut brain = MobBrain::new(wanderer(&viewport), 42);
        let spawn = [500.0_f32, 400.0];
        let mut pos = spawn;
        let mut time = 0.0;
        for _ in 0..4000 {
            let out = brain
                .update(time, &viewport, pos, None, HALF)
                .unwrap();
            pos[0] += out.velocity[0];
            pos[1] += out.velocity[1];
            time += TICK_MS;
            let off = (pos[0] - spawn[0]).hypot(pos[1] - spawn[1]);
            // containment bias plus at most one tick of displacement
            assert!(off <= 100.0 * 0.7 + 2.0 + 1e-3, "escaped at {off}");
        }
    }

    #[test]
    fn test_wanderer_eventually_moves() {
        let viewport = viewport();
        let mut brain = MobBrain::new(wanderer(&viewport), 7);
        let mut moved = false;
        let mut time = 0.0;
        for _ in 0..2000 {
            let out = brain
                .update(time, &viewport, [500.0, 400.0], None, HALF)
                .unwrap();
            if out.velocity != [0.0, 0.0] {
                moved = true;
                break;
            }
            time += TICK_MS;
        }
        assert!(moved);
    }

    #[test]
    fn test_still_brain_never_moves() {
        let viewport = viewport();
        let config = AiDescriptor::new().build().unwrap();
        let mut brain = MobBrain::new(config, 3);
        let out = brain
            .update(5000.0, &viewport, [100.0, 100.0], None, HALF)
            .unwrap();
        assert_eq!(out.velocity, [0.0, 0.0]);
        assert_eq!(out.ai_state, AiState::Still);
        assert_eq!(out.anim_state, AnimState::Idle);
    }

    #[test]
    fn test_vision_range_gates_hostility() {
        let viewport = viewport();
        let mut brain = MobBrain::new(rusher(&viewport), 11);
        let pos = [500.0, 400.0];

        let out = brain
            .update(1.0, &viewport, pos, Some([900.0, 400.0]), HALF)
            .unwrap();
        assert_eq!(out.ai_state, AiState::Wandering);

        let out = brain
            .update(1_000_000.0, &viewport, pos, Some([700.0, 400.0]), HALF)
            .unwrap();
        assert_ne!(out.ai_state, AiState::Wandering);
    }

    #[test]
    fn test_rush_starts_exactly_when_pause_elapses() {
        let viewport = viewport();
        let mut brain = MobBrain::new(rusher(&viewport), 19);
        let pos = [500.0, 400.0];
        // inside vision (300) but outside the activation range (150),
        // so only the full pause can trigger the rush
        let target = Some([700.0, 400.0]);
        let pause = brain.rush_pause_duration();

        if pause > 1.0 {
            let out = brain
                .update(pause - 1.0, &viewport, pos, target, HALF)
                .unwrap();
            assert_eq!(out.ai_state, AiState::Chasing);
        }

        let out = brain.update(pause, &viewport, pos, target, HALF).unwrap();
        assert_eq!(out.ai_state, AiState::Rushing);
        assert_eq!(out.anim_state, AnimState::Rushing);
    }

    #[test]
    fn test_middle_ranged_rushes_early_inside_activation_range() {
        let viewport = viewport();
        let config = AiDescriptor::new()
            .set_middle_ranged(&viewport, 300.0, 2.5, 10_000.0, 4, 2.0, 120.0, 2000.0)
            .unwrap()
            .set_attack(&viewport, 2400.0, 250.0, 14.0)
            .unwrap()
            .build()
            .unwrap();
        let mut brain = MobBrain::new(config, 19);
        let pos = [500.0, 400.0];
        // distance 100, inside the activation range (vision / 2 = 150)
        let target = Some([600.0, 400.0]);
        let half_pause = brain.rush_pause_duration() / 2.0;

        if half_pause > 1.0 {
            let out = brain
                .update(half_pause - 1.0, &viewport, pos, target, HALF)
                .unwrap();
            assert_eq!(out.ai_state, AiState::LongRangeAttacking);
        }

        let out = brain
            .update(half_pause, &viewport, pos, target, HALF)
            .unwrap();
        assert_eq!(out.ai_state, AiState::Rushing);
        assert_eq!(out.anim_state, AnimState::Rushing);
    }

    #[test]
    fn test_rush_quota_then_back_to_chasing() {
        let viewport = viewport();
        let mut brain = MobBrain::new(rusher(&viewport), 23);
        let pos = [500.0, 400.0];
        // adjacent target: the dash window collapses immediately
        let target = Some([505.0, 400.0]);
        let mut time = 20_000.0;
        let gate = 2400.0 / 6.0;

        let mut attacks = 0;
        let mut ticks = 0;
        loop {
            let out = brain.update(time, &viewport, pos, target, HALF).unwrap();
            if out.attack {
                attacks += 1;
            }
            if out.ai_state == AiState::Chasing {
                break;
            }
            time += gate + 1.0;
            ticks += 1;
            assert!(ticks < 100, "rush never terminated");
        }
        assert_eq!(attacks, 4);
    }

    #[test]
    fn test_follower_chases_beyond_vision() {
        let viewport = viewport();
        let config = AiDescriptor::new()
            .set_wandering(&viewport, 2.0, 100.0, 1000.0)
            .unwrap()
            .follower(&viewport, 3.0)
            .unwrap()
            .build()
            .unwrap();
        let mut brain = MobBrain::new(config, 5);

        let out = brain
            .update(1.0, &viewport, [0.0, 0.0], Some([900.0, 0.0]), HALF)
            .unwrap();
        assert_eq!(out.ai_state, AiState::Chasing);
        assert_relative_eq!(out.velocity[0], 3.0, max_relative = 1e-3);
        assert_relative_eq!(out.velocity[1], 0.0);
    }

    #[test]
    fn test_chase_stops_at_arrival_threshold() {
        let viewport = viewport();
        let config = AiDescriptor::new()
            .follower(&viewport, 3.0)
            .unwrap()
            .build()
            .unwrap();
        let mut brain = MobBrain::new(config, 5);

        // floored distance 10 < max(13, 10) + 1
        let out = brain
            .update(1.0, &viewport, [0.0, 0.0], Some([10.5, 0.0]), HALF)
            .unwrap();
        assert_eq!(out.velocity, [0.0, 0.0]);
    }

    #[test]
    fn test_kiting_blend_at_preferred_distance_is_tangential() {
        let viewport = viewport();
        let config = AiDescriptor::new()
            .set_long_ranged(&viewport, 500.0, 2.0, 200.0, 2000.0)
            .unwrap()
            .set_attack(&viewport, 2000.0, 400.0, 10.0)
            .unwrap()
            .build()
            .unwrap();
        let mut brain = MobBrain::new(config, 31);

        // exactly at the kiting distance: coef = 0, pure tangential
        let out = brain
            .update(1.0, &viewport, [0.0, 0.0], Some([200.0, 0.0]), HALF)
            .unwrap();
        assert_eq!(out.ai_state, AiState::LongRangeAttacking);
        assert_relative_eq!(out.velocity[0], 0.0, epsilon = 1e-4);
        assert_relative_eq!(out.velocity[1].abs(), 2.0, max_relative = 1e-3);

        // far beyond it: coef clamps to 1, pure radial approach
        let out = brain
            .update(2.0, &viewport, [0.0, 0.0], Some([480.0, 0.0]), HALF)
            .unwrap();
        assert_relative_eq!(out.velocity[0], 2.0, max_relative = 1e-3);
        assert_relative_eq!(out.velocity[1], 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_leaving_vision_re_anchors_wandering() {
        let viewport = viewport();
        let mut brain = MobBrain::new(rusher(&viewport), 13);
        let pos = [500.0, 400.0];

        let out = brain
            .update(1_000_000.0, &viewport, pos, Some([600.0, 400.0]), HALF)
            .unwrap();
        assert_ne!(out.ai_state, AiState::Wandering);

        let out = brain
            .update(1_000_016.0, &viewport, pos, Some([900.0, 400.0]), HALF)
            .unwrap();
        assert_eq!(out.ai_state, AiState::Wandering);
        // fresh entry zeroes the heading until the next phase draw
        assert_eq!(out.velocity, [0.0, 0.0]);
    }
}
