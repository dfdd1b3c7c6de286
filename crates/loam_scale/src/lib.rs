//! Loam Scale - Resolution-Independent Scalars
//!
//! Every position, size and speed in the simulation is stored as a
//! fraction of a reference screen dimension and resolved to an absolute
//! value on read. Resizing the viewport rescales every quantity at once
//! without touching the stored fractions.
//!
//! # Example
//!
//! ```ignore
//! use loam_scale::prelude::*;
//!
//! let viewport = Viewport::new(1920.0, 1080.0);
//! let speed = Scaled::new(&viewport, Axis::X, 4.0)?;
//! viewport.resize(960.0, 540.0);
//! assert_eq!(speed.get(&viewport), 2.0);
//! ```

pub mod scaled;
pub mod viewport;

pub mod prelude {
    pub use crate::scaled::{Axis, ScaleError, Scaled, ScaledPoint};
    pub use crate::viewport::{Extent, Viewport};
}

pub use prelude::*;
