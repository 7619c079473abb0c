//! # nf2ff Data
//!
//! Near-field data consumed by the projection. A dataset maps monitor names
//! to [`FieldData`](field::FieldData): complex E/H components sampled on a
//! rectilinear grid at one or more frequencies.
//!
//! All sources implement the [`NearFieldSource`](source::NearFieldSource)
//! trait, so the projection never depends on how the data was produced or
//! stored. [`SimulationData`](source::SimulationData) is the in-memory
//! implementation.
//!
//! ## Resampling
//!
//! Recorded components are resampled onto arbitrary coordinates with
//! multilinear interpolation ([`interp`]), clamped to the recorded range.

pub mod field;
pub mod interp;
pub mod source;

pub use field::{DataError, FieldComponent, FieldData, ScalarFieldData};
pub use source::{MissingDataError, NearFieldSource, SimulationData};
