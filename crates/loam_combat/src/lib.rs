//! Loam Combat - Health, Damage and Projectiles
//!
//! Integer health with an invulnerable variant, damage records, and
//! the projectile runtime used by ranged attacks.
//!
//! # Example
//!
//! ```ignore
//! use loam_combat::prelude::*;
//!
//! let mut health = Health::new(10);
//! health.apply(&Damage::new(2, None));
//! assert!(!health.is_dead());
//! ```

pub mod damage;
pub mod health;
pub mod projectile;

pub mod prelude {
    pub use crate::damage::Damage;
    pub use crate::health::Health;
    pub use crate::projectile::{Projectile, ProjectileSpec};
}

pub use prelude::*;
