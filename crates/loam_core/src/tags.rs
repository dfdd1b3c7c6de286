//! Tag bits carried by hitboxes
//!
//! Overlap callbacks receive the other side's tag bits so a teleport zone
//! can check "was that the player?" without knowing about entity types.

/// The tracked player entity
pub const PLAYER: u32 = 1 << 0;
/// A non-player creature
pub const MOB: u32 = 1 << 1;
/// A projectile in flight
pub const PROJECTILE: u32 = 1 << 2;
/// Scenery / trigger-only geometry with no owner
pub const SCENERY: u32 = 1 << 3;

/// Check whether `tags` contains all bits of `wanted`
pub const fn has(tags: u32, wanted: u32) -> bool {
    tags & wanted == wanted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has() {
        assert!(has(PLAYER | MOB, PLAYER));
        assert!(!has(MOB, PLAYER));
        assert!(has(PLAYER | MOB | PROJECTILE, PLAYER | MOB));
    }
}
