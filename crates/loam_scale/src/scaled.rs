//! Scaled values and points

use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when assigning a scaled value
#[derive(Debug, Error, PartialEq)]
pub enum ScaleError {
    /// Assignment produced a non-finite fraction (zero reference
    /// dimension included). Caught at construction so NaN never
    /// propagates into the simulation.
    #[error("scaled value {value} is not finite against reference {reference}")]
    NonFinite { value: f32, reference: f32 },
}

/// Which reference dimension a value scales against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Scales with the viewport width
    X,
    /// Scales with the viewport height
    Y,
}

impl Axis {
    fn reference(self, viewport: &Viewport) -> f32 {
        match self {
            Axis::X => viewport.width(),
            Axis::Y => viewport.height(),
        }
    }
}

/// A scalar stored as a fraction of a reference screen dimension.
///
/// `get()` returns `fraction * reference`, so a viewport resize changes
/// the absolute value without mutating the fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scaled {
    axis: Axis,
    fraction: f32,
}

impl Scaled {
    /// Store `absolute` as a fraction of the current reference dimension
    pub fn new(viewport: &Viewport, axis: Axis, absolute: f32) -> Result<Self, ScaleError> {
        let mut scaled = Self {
            axis,
            fraction: 0.0,
        };
        scaled.set(viewport, absolute)?;
        Ok(scaled)
    }

    /// A zero value on `axis` (never fails: a zero fraction needs no
    /// division)
    pub const fn zero(axis: Axis) -> Self {
        Self {
            axis,
            fraction: 0.0,
        }
    }

    /// Recompute the fraction from a new absolute value
    pub fn set(&mut self, viewport: &Viewport, absolute: f32) -> Result<(), ScaleError> {
        let reference = self.axis.reference(viewport);
        let fraction = absolute / reference;
        if !fraction.is_finite() {
            return Err(ScaleError::NonFinite {
                value: absolute,
                reference,
            });
        }
        self.fraction = fraction;
        Ok(())
    }

    /// Resolve to an absolute value against the current reference
    pub fn get(&self, viewport: &Viewport) -> f32 {
        self.fraction * self.axis.reference(viewport)
    }

    /// The stored fraction
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// The reference axis
    pub fn axis(&self) -> Axis {
        self.axis
    }
}

/// An (x, y) pair of scaled values: x against the width, y against the
/// height. Every world position, velocity and box size is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledPoint {
    pub x: Scaled,
    pub y: Scaled,
}

impl ScaledPoint {
    /// Store an absolute point
    pub fn new(viewport: &Viewport, x: f32, y: f32) -> Result<Self, ScaleError> {
        Ok(Self {
            x: Scaled::new(viewport, Axis::X, x)?,
            y: Scaled::new(viewport, Axis::Y, y)?,
        })
    }

    /// A zero point (never fails: a zero fraction needs no division)
    pub fn zero() -> Self {
        Self {
            x: Scaled {
                axis: Axis::X,
                fraction: 0.0,
            },
            y: Scaled {
                axis: Axis::Y,
                fraction: 0.0,
            },
        }
    }

    /// Resolve both components
    pub fn get(&self, viewport: &Viewport) -> [f32; 2] {
        [self.x.get(viewport), self.y.get(viewport)]
    }

    /// Assign both components from absolutes
    pub fn set(&mut self, viewport: &Viewport, x: f32, y: f32) -> Result<(), ScaleError> {
        self.x.set(viewport, x)?;
        self.y.set(viewport, y)
    }

    /// Straight-line distance to another point, in absolute pixels
    pub fn distance_to(&self, viewport: &Viewport, other: &ScaledPoint) -> f32 {
        let [ax, ay] = self.get(viewport);
        let [bx, by] = other.get(viewport);
        (bx - ax).hypot(by - ay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_trip_at_construction_extent() {
        let viewport = Viewport::new(1920.0, 1080.0);
        let value = Scaled::new(&viewport, Axis::X, 128.0).unwrap();
        assert_relative_eq!(value.get(&viewport), 128.0);
    }

    #[test]
    fn test_resize_rescales_reads() {
        let viewport = Viewport::new(1000.0, 500.0);
        let value = Scaled::new(&viewport, Axis::X, 100.0).unwrap();

        viewport.resize(2000.0, 1000.0);
        // get() == x * R'/R without any mutation of the fraction
        assert_relative_eq!(value.get(&viewport), 200.0);
        assert_relative_eq!(value.fraction(), 0.1);
    }

    #[test]
    fn test_y_axis_scales_with_height() {
        let viewport = Viewport::new(1000.0, 500.0);
        let value = Scaled::new(&viewport, Axis::Y, 50.0).unwrap();

        viewport.resize(1000.0, 250.0);
        assert_relative_eq!(value.get(&viewport), 25.0);
    }

    #[test]
    fn test_zero_reference_is_a_construction_error() {
        let viewport = Viewport::new(0.0, 100.0);
        let result = Scaled::new(&viewport, Axis::X, 10.0);
        assert!(matches!(result, Err(ScaleError::NonFinite { .. })));
    }

    #[test]
    fn test_non_finite_assignment_rejected() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut value = Scaled::new(&viewport, Axis::X, 10.0).unwrap();
        assert!(value.set(&viewport, f32::NAN).is_err());
        // The previous fraction survives a failed set
        assert_relative_eq!(value.get(&viewport), 10.0);
    }

    #[test]
    fn test_point_distance() {
        let viewport = Viewport::new(100.0, 100.0);
        let a = ScaledPoint::new(&viewport, 0.0, 0.0).unwrap();
        let b = ScaledPoint::new(&viewport, 3.0, 4.0).unwrap();
        assert_relative_eq!(a.distance_to(&viewport, &b), 5.0);
    }
}
