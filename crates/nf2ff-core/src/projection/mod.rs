//! Far-field projector abstraction and implementations.
//!
//! The [`FarFieldProjector`] trait derives every far-field quantity from
//! radiation vectors, so an implementation only has to supply $\mathbf{N}$
//! and $\mathbf{L}$ for a direction. [`Near2Far`] implements it for
//! near-field data recorded on planar surface monitors.

mod near2far;

pub use near2far::Near2Far;

use nf2ff_data::{DataError, MissingDataError};
use nf2ff_geometry::coords::{cartesian_to_spherical, spherical_field_to_cartesian};
use nf2ff_geometry::GeometryError;
use thiserror::Error;

use crate::fields::{self, poynting_power, radiated_fields, recenter};
use crate::types::{FieldVector, PhaseConvention, RadiationVectors};

/// Errors raised while setting up a projection.
///
/// Setup is all-or-nothing: no projector is returned when any monitor fails.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    MissingData(#[from] MissingDataError),

    #[error("Monitor data could not be resampled: {0}")]
    Data(#[from] DataError),

    #[error("Invalid projection parameter: {0}")]
    InvalidParameter(String),
}

impl SetupError {
    /// A monitor is not a valid planar surface.
    pub fn is_geometry(&self) -> bool {
        matches!(self, SetupError::Geometry(_))
    }

    /// A monitor, field component or frequency is absent from the dataset.
    pub fn is_missing_data(&self) -> bool {
        matches!(self, SetupError::MissingData(_))
    }
}

/// Far-field queries over an immutable radiator.
///
/// Spherical query points are given in the caller's frame and re-centred on
/// [`origin`](FarFieldProjector::origin) before evaluation. Points at the
/// origin or on the poles are not rejected; they yield non-finite or
/// degenerate values.
pub trait FarFieldProjector {
    /// Operating frequency (Hz).
    fn frequency(&self) -> f64;

    /// Free-space wavenumber (µm⁻¹).
    fn wavenumber(&self) -> f64;

    fn phase_convention(&self) -> PhaseConvention;

    /// Phase and observation reference point (µm).
    fn origin(&self) -> [f64; 3];

    /// Radiation vectors towards (θ, φ), measured about the origin.
    fn radiation_vectors(&self, theta: f64, phi: f64) -> RadiationVectors;

    /// Spherical `(E, H)` at `(r, θ, φ)`, ordered `(r, θ, φ)`.
    fn fields_spherical(&self, r: f64, theta: f64, phi: f64) -> (FieldVector, FieldVector) {
        let (r, theta, phi) = recenter(&self.origin(), r, theta, phi);
        let rv = self.radiation_vectors(theta, phi);
        radiated_fields(&rv, self.wavenumber(), self.phase_convention(), r)
    }

    /// Cartesian `(E, H)` at `(x, y, z)`, ordered `(x, y, z)`.
    ///
    /// The point is re-centred before delegating to
    /// [`fields_spherical`](FarFieldProjector::fields_spherical), which
    /// re-centres it again.
    fn fields_cartesian(&self, x: f64, y: f64, z: f64) -> (FieldVector, FieldVector) {
        let origin = self.origin();
        let (r, theta, phi) = cartesian_to_spherical(x - origin[0], y - origin[1], z - origin[2]);
        let (e, h) = self.fields_spherical(r, theta, phi);
        (
            spherical_field_to_cartesian(&e, theta, phi),
            spherical_field_to_cartesian(&h, theta, phi),
        )
    }

    /// Time-averaged radial power density at `(r, θ, φ)`.
    fn power_spherical(&self, r: f64, theta: f64, phi: f64) -> f64 {
        let (e, h) = self.fields_spherical(r, theta, phi);
        poynting_power(&e, &h)
    }

    /// Power density at `(x, y, z)`. The point is converted to spherical
    /// coordinates as given, without a separate re-centring step.
    fn power_cartesian(&self, x: f64, y: f64, z: f64) -> f64 {
        let (r, theta, phi) = cartesian_to_spherical(x, y, z);
        self.power_spherical(r, theta, phi)
    }

    /// Radar cross section towards `(r, θ, φ)`.
    fn radar_cross_section(&self, r: f64, theta: f64, phi: f64) -> f64 {
        let (_, theta, phi) = recenter(&self.origin(), r, theta, phi);
        fields::radar_cross_section(&self.radiation_vectors(theta, phi), self.wavenumber())
    }
}
