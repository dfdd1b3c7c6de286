//! Integer health with an invulnerable variant

use crate::damage::Damage;
use serde::{Deserialize, Serialize};

/// Health points of an entity.
///
/// `None` means invulnerable: damage and healing are no-ops and the
/// entity never dies. Death is *exactly* zero points; damage saturates
/// there rather than going negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    points: Option<i32>,
}

impl Health {
    /// Mortal health with `points` hit points
    pub fn new(points: i32) -> Self {
        Self {
            points: Some(points.max(0)),
        }
    }

    /// Health that ignores all damage
    pub fn invulnerable() -> Self {
        Self { points: None }
    }

    /// Current points, `None` when invulnerable
    pub fn points(&self) -> Option<i32> {
        self.points
    }

    /// Apply damage, saturating at zero. Invulnerable health ignores it.
    pub fn apply(&mut self, damage: &Damage) {
        if let Some(points) = self.points.as_mut() {
            *points = (*points - damage.amount).max(0);
        }
    }

    /// Restore points, no cap. Invulnerable health ignores it.
    pub fn heal(&mut self, amount: i32) {
        if let Some(points) = self.points.as_mut() {
            *points += amount;
        }
    }

    /// Dead is exactly zero points
    pub fn is_dead(&self) -> bool {
        self.points == Some(0)
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::invulnerable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_saturates_at_zero() {
        let mut health = Health::new(5);
        health.apply(&Damage::new(8, None));
        assert_eq!(health.points(), Some(0));
        assert!(health.is_dead());
    }

    #[test]
    fn test_invulnerable_ignores_damage() {
        let mut health = Health::invulnerable();
        health.apply(&Damage::new(1000, None));
        assert_eq!(health.points(), None);
        assert!(!health.is_dead());
    }

    #[test]
    fn test_only_exact_zero_is_dead() {
        assert!(!Health::new(1).is_dead());
        assert!(Health::new(0).is_dead());
        assert!(!Health::invulnerable().is_dead());
    }

    #[test]
    fn test_heal_revives() {
        let mut health = Health::new(2);
        health.apply(&Damage::new(2, None));
        assert!(health.is_dead());
        health.heal(3);
        assert_eq!(health.points(), Some(3));
        assert!(!health.is_dead());
    }
}
