//! AI descriptors: capability bundles and the validated builder
//!
//! A mob's AI is described by which bundles it carries. Wandering is
//! the universal fallback; the hostile bundles (rusher, long-range)
//! require an attack bundle, checked at `build` time so a half-wired
//! hostile mob is a construction error, not a runtime surprise.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use loam_scale::{Axis, Scaled, ScaleError, Viewport};

/// Errors raised when finalizing a descriptor
#[derive(Debug, Error, PartialEq)]
pub enum AiConfigError {
    /// A hostile bundle was set without an attack bundle
    #[error("hostile AI bundle requires an attack bundle")]
    MissingAttack,
}

/// Random-walk parameters, the universal fallback behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WanderingParams {
    /// Walk speed, scales with viewport width
    pub speed: Scaled,
    /// Max distance from the anchor point
    pub radius: Scaled,
    /// Milliseconds between heading redraws while walking
    pub direction_change_interval_ms: f64,
}

impl Default for WanderingParams {
    /// Zero speed: the mob holds its anchor (the still state)
    fn default() -> Self {
        Self {
            speed: Scaled::zero(Axis::X),
            radius: Scaled::zero(Axis::X),
            direction_change_interval_ms: 3000.0,
        }
    }
}

/// Unconditional pursuit, no vision gate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FollowerParams {
    pub chase_speed: Scaled,
}

/// Dash-burst hostile bundle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RusherParams {
    /// Target detection range
    pub vision_range: Scaled,
    /// Speed while closing between rushes
    pub chase_speed: Scaled,
    /// Base cooldown between rushes; actual pauses are a uniform draw
    /// against it
    pub rush_cooldown_ms: f64,
    /// Attack quota per rush before falling back to chasing
    pub attacks_per_rush: u32,
    /// Inside this range a middle-ranged mob rushes early, at half the
    /// usual pause
    pub rush_activation_range: Scaled,
    /// Length of the dash window
    pub dash_duration_ms: f64,
    /// Speed during the dash window
    pub dash_speed: Scaled,
}

/// Kiting hostile bundle: hold a preferred distance and circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongRangeParams {
    /// Target detection range
    pub vision_range: Scaled,
    /// Top speed of the radial/tangential blend
    pub chase_speed: Scaled,
    /// Preferred distance to the target
    pub kiting_distance: Scaled,
    /// Base cooldown for circling direction flips; actual pauses are a
    /// uniform draw against it
    pub direction_change_cooldown_ms: f64,
}

/// Attack tuning shared by every hostile routine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackParams {
    /// Milliseconds between attacks while chasing; rush attacks gate on
    /// a sixth of this, long-range pauses on a redrawn multiple of it
    pub cooldown_ms: f64,
    /// Max distance at which an attack connects
    pub range: Scaled,
    /// Speed handed to spawned projectiles
    pub projectile_speed: Scaled,
}

/// Default dash tuning applied by [`AiDescriptor::set_rusher`]
const DEFAULT_DASH_DURATION_MS: f64 = 1000.0;
const DEFAULT_DASH_SPEED: f32 = 12.0;

/// Fluent descriptor for a mob's AI. Each setter consumes and returns
/// the descriptor; `build` validates the combination.
#[derive(Debug, Clone, Default)]
pub struct AiDescriptor {
    wandering: Option<WanderingParams>,
    follower: Option<FollowerParams>,
    rusher: Option<RusherParams>,
    long_range: Option<LongRangeParams>,
    attack: Option<AttackParams>,
    others: HashMap<String, f32>,
}

impl AiDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wandering bundle (absolute speed and radius)
    pub fn set_wandering(
        mut self,
        viewport: &Viewport,
        speed: f32,
        radius: f32,
        direction_change_interval_ms: f64,
    ) -> Result<Self, ScaleError> {
        self.wandering = Some(WanderingParams {
            speed: Scaled::new(viewport, Axis::X, speed)?,
            radius: Scaled::new(viewport, Axis::X, radius)?,
            direction_change_interval_ms,
        });
        Ok(self)
    }

    /// Chase the target unconditionally, ignoring vision range
    pub fn follower(mut self, viewport: &Viewport, chase_speed: f32) -> Result<Self, ScaleError> {
        self.follower = Some(FollowerParams {
            chase_speed: Scaled::new(viewport, Axis::X, chase_speed)?,
        });
        Ok(self)
    }

    /// Set the rusher bundle. Activation range defaults to half the
    /// vision range and the dash tuning to its stock values; override
    /// with [`with_rush_activation_range`] and [`with_dash`].
    ///
    /// [`with_rush_activation_range`]: AiDescriptor::with_rush_activation_range
    /// [`with_dash`]: AiDescriptor::with_dash
    pub fn set_rusher(
        mut self,
        viewport: &Viewport,
        vision_range: f32,
        chase_speed: f32,
        rush_cooldown_ms: f64,
        attacks_per_rush: u32,
    ) -> Result<Self, ScaleError> {
        self.rusher = Some(RusherParams {
            vision_range: Scaled::new(viewport, Axis::X, vision_range)?,
            chase_speed: Scaled::new(viewport, Axis::X, chase_speed)?,
            rush_cooldown_ms,
            attacks_per_rush,
            rush_activation_range: Scaled::new(viewport, Axis::X, vision_range / 2.0)?,
            dash_duration_ms: DEFAULT_DASH_DURATION_MS,
            dash_speed: Scaled::new(viewport, Axis::X, DEFAULT_DASH_SPEED)?,
        });
        Ok(self)
    }

    /// Override the early-rush activation range of a rusher bundle.
    /// No-op if no rusher bundle is set.
    pub fn with_rush_activation_range(
        mut self,
        viewport: &Viewport,
        range: f32,
    ) -> Result<Self, ScaleError> {
        if let Some(rusher) = self.rusher.as_mut() {
            rusher.rush_activation_range = Scaled::new(viewport, Axis::X, range)?;
        }
        Ok(self)
    }

    /// Override the dash tuning of a rusher bundle. No-op if no rusher
    /// bundle is set.
    pub fn with_dash(
        mut self,
        viewport: &Viewport,
        duration_ms: f64,
        speed: f32,
    ) -> Result<Self, ScaleError> {
        if let Some(rusher) = self.rusher.as_mut() {
            rusher.dash_duration_ms = duration_ms;
            rusher.dash_speed = Scaled::new(viewport, Axis::X, speed)?;
        }
        Ok(self)
    }

    /// Set the long-range kiting bundle
    pub fn set_long_ranged(
        mut self,
        viewport: &Viewport,
        vision_range: f32,
        chase_speed: f32,
        kiting_distance: f32,
        direction_change_cooldown_ms: f64,
    ) -> Result<Self, ScaleError> {
        self.long_range = Some(LongRangeParams {
            vision_range: Scaled::new(viewport, Axis::X, vision_range)?,
            chase_speed: Scaled::new(viewport, Axis::X, chase_speed)?,
            kiting_distance: Scaled::new(viewport, Axis::X, kiting_distance)?,
            direction_change_cooldown_ms,
        });
        Ok(self)
    }

    /// Both hostile bundles at once: rush when ready or close, kite
    /// otherwise
    #[allow(clippy::too_many_arguments)]
    pub fn set_middle_ranged(
        self,
        viewport: &Viewport,
        vision_range: f32,
        chase_speed: f32,
        rush_cooldown_ms: f64,
        attacks_per_rush: u32,
        kiting_speed: f32,
        kiting_distance: f32,
        direction_change_cooldown_ms: f64,
    ) -> Result<Self, ScaleError> {
        self.set_rusher(
            viewport,
            vision_range,
            chase_speed,
            rush_cooldown_ms,
            attacks_per_rush,
        )?
        .set_long_ranged(
            viewport,
            vision_range,
            kiting_speed,
            kiting_distance,
            direction_change_cooldown_ms,
        )
    }

    /// Set the attack bundle every hostile routine gates on
    pub fn set_attack(
        mut self,
        viewport: &Viewport,
        cooldown_ms: f64,
        range: f32,
        projectile_speed: f32,
    ) -> Result<Self, ScaleError> {
        self.attack = Some(AttackParams {
            cooldown_ms,
            range: Scaled::new(viewport, Axis::X, range)?,
            projectile_speed: Scaled::new(viewport, Axis::X, projectile_speed)?,
        });
        Ok(self)
    }

    /// Attach free-form tuning values for mob-specific hooks
    pub fn set_others(mut self, others: HashMap<String, f32>) -> Self {
        self.others = others;
        self
    }

    /// Validate and finalize. Hostile bundles without an attack bundle
    /// are rejected; a missing wandering bundle falls back to the still
    /// default.
    pub fn build(self) -> Result<AiConfig, AiConfigError> {
        let hostile = self.rusher.is_some() || self.long_range.is_some();
        if hostile && self.attack.is_none() {
            return Err(AiConfigError::MissingAttack);
        }
        Ok(AiConfig {
            wandering: self.wandering.unwrap_or_default(),
            follower: self.follower,
            rusher: self.rusher,
            long_range: self.long_range,
            attack: self.attack,
            others: self.others,
        })
    }
}

/// A validated AI configuration, ready to drive a brain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub wandering: WanderingParams,
    pub follower: Option<FollowerParams>,
    pub rusher: Option<RusherParams>,
    pub long_range: Option<LongRangeParams>,
    pub attack: Option<AttackParams>,
    /// Free-form tuning values for mob-specific hooks
    pub others: HashMap<String, f32>,
}

impl AiConfig {
    /// Whether any hostile bundle is present
    pub fn is_hostile(&self) -> bool {
        self.rusher.is_some() || self.long_range.is_some()
    }

    /// Detection range: the rusher's if present, else the long-range
    /// bundle's
    pub fn vision_range(&self) -> Option<Scaled> {
        self.rusher
            .map(|r| r.vision_range)
            .or_else(|| self.long_range.map(|l| l.vision_range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 800.0)
    }

    #[test]
    fn test_hostile_without_attack_is_rejected() {
        let viewport = viewport();
        let result = AiDescriptor::new()
            .set_rusher(&viewport, 600.0, 2.5, 10_000.0, 4)
            .unwrap()
            .build();
        assert_eq!(result.unwrap_err(), AiConfigError::MissingAttack);
    }

    #[test]
    fn test_wanderer_needs_no_attack() {
        let viewport = viewport();
        let config = AiDescriptor::new()
            .set_wandering(&viewport, 2.0, 120.0, 3000.0)
            .unwrap()
            .build()
            .unwrap();
        assert!(!config.is_hostile());
        assert!(config.vision_range().is_none());
    }

    #[test]
    fn test_empty_descriptor_falls_back_to_still() {
        let config = AiDescriptor::new().build().unwrap();
        assert_eq!(config.wandering.speed.fraction(), 0.0);
    }

    #[test]
    fn test_rush_activation_range_defaults_to_half_vision() {
        let viewport = viewport();
        let config = AiDescriptor::new()
            .set_rusher(&viewport, 600.0, 2.5, 10_000.0, 4)
            .unwrap()
            .set_attack(&viewport, 2000.0, 500.0, 14.0)
            .unwrap()
            .build()
            .unwrap();
        let rusher = config.rusher.unwrap();
        assert_eq!(rusher.rush_activation_range.get(&viewport), 300.0);
        assert_eq!(rusher.dash_duration_ms, 1000.0);
    }

    #[test]
    fn test_middle_ranged_sets_both_bundles() {
        let viewport = viewport();
        let config = AiDescriptor::new()
            .set_middle_ranged(&viewport, 640.0, 2.5, 10_000.0, 4, 1.3, 290.0, 2000.0)
            .unwrap()
            .set_attack(&viewport, 2000.0, 512.0, 14.7)
            .unwrap()
            .build()
            .unwrap();
        assert!(config.rusher.is_some());
        assert!(config.long_range.is_some());
        assert!(config.is_hostile());
    }
}
