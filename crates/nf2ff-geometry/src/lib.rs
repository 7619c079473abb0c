//! # nf2ff Geometry
//!
//! Geometry handling for the near-field to far-field projection. This crate
//! provides:
//!
//! - **Axes** ([`axis`]): Tagged principal axes used instead of positional
//!   indices when selecting normal and tangential directions.
//! - **Surface monitors** ([`monitor`]): Planar, axis-aligned monitor
//!   descriptors with an explicit outward normal direction.
//! - **Collocation grids** ([`grid`]): Wavelength-scaled 2D sampling meshes
//!   spanning a monitor surface.
//! - **Coordinates** ([`coords`]): Spherical ⇄ cartesian conversions for
//!   points and vector field components.

pub mod axis;
pub mod coords;
pub mod grid;
pub mod monitor;

pub use axis::Axis;
pub use grid::CollocationGrid;
pub use monitor::{GeometryError, NormalDirection, SurfaceMonitor};
