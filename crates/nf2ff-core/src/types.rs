//! Core types shared across the projection pipeline.
//!
//! Lengths are in micrometres and frequencies in hertz throughout.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Speed of light in vacuum (µm/s).
pub const C_0: f64 = 2.997_924_58e14;

/// Impedance of free space (Ω).
pub const ETA_0: f64 = 376.730_313_668;

/// Default collocation density on monitor surfaces.
pub const DEFAULT_POINTS_PER_WAVELENGTH: usize = 10;

/// A complex 3-vector. Spherical results are ordered `(r, θ, φ)`, cartesian
/// results `(x, y, z)`.
pub type FieldVector = [Complex64; 3];

/// Sign of the harmonic time convention.
///
/// `Positive` treats outgoing waves as $e^{+jkr}$, `Negative` as $e^{-jkr}$.
/// The convention is fixed for the lifetime of a projector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseConvention {
    #[default]
    Positive,
    Negative,
}

impl PhaseConvention {
    pub fn sign(self) -> f64 {
        match self {
            PhaseConvention::Positive => 1.0,
            PhaseConvention::Negative => -1.0,
        }
    }
}

/// Parameters of a near-to-far projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// Operating frequency (Hz). Must be recorded by every monitor.
    pub frequency: f64,
    /// Collocation density on each monitor surface.
    #[serde(default = "default_points_per_wavelength")]
    pub points_per_wavelength: usize,
    /// Harmonic time convention.
    #[serde(default)]
    pub phase_convention: PhaseConvention,
}

fn default_points_per_wavelength() -> usize {
    DEFAULT_POINTS_PER_WAVELENGTH
}

impl ProjectionParams {
    /// Parameters at `frequency` with default sampling and phase convention.
    pub fn new(frequency: f64) -> Self {
        Self {
            frequency,
            points_per_wavelength: DEFAULT_POINTS_PER_WAVELENGTH,
            phase_convention: PhaseConvention::default(),
        }
    }

    pub fn with_points_per_wavelength(mut self, points_per_wavelength: usize) -> Self {
        self.points_per_wavelength = points_per_wavelength;
        self
    }

    pub fn with_phase_convention(mut self, phase_convention: PhaseConvention) -> Self {
        self.phase_convention = phase_convention;
        self
    }

    /// Free-space wavenumber $k_0 = 2\pi f / c_0$ (µm⁻¹).
    pub fn wavenumber(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.frequency / C_0
    }

    /// Free-space wavelength (µm).
    pub fn wavelength(&self) -> f64 {
        C_0 / self.frequency
    }
}

/// Far-field radiation vectors in spherical components.
///
/// $\mathbf{N}$ is the transform of the electric surface current
/// $\mathbf{J}$, $\mathbf{L}$ that of the magnetic current $\mathbf{M}$.
/// Contributions from several surfaces referenced to the same origin add.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RadiationVectors {
    pub n_theta: Complex64,
    pub n_phi: Complex64,
    pub l_theta: Complex64,
    pub l_phi: Complex64,
}

impl RadiationVectors {
    /// Multiply all four components by a complex constant.
    pub fn scale(&self, factor: Complex64) -> Self {
        Self {
            n_theta: self.n_theta * factor,
            n_phi: self.n_phi * factor,
            l_theta: self.l_theta * factor,
            l_phi: self.l_phi * factor,
        }
    }
}

impl Add for RadiationVectors {
    type Output = RadiationVectors;

    fn add(self, rhs: RadiationVectors) -> RadiationVectors {
        RadiationVectors {
            n_theta: self.n_theta + rhs.n_theta,
            n_phi: self.n_phi + rhs.n_phi,
            l_theta: self.l_theta + rhs.l_theta,
            l_phi: self.l_phi + rhs.l_phi,
        }
    }
}

impl AddAssign for RadiationVectors {
    fn add_assign(&mut self, rhs: RadiationVectors) {
        *self = *self + rhs;
    }
}

impl Sum for RadiationVectors {
    fn sum<I: Iterator<Item = RadiationVectors>>(iter: I) -> Self {
        iter.fold(RadiationVectors::default(), Add::add)
    }
}

/// Far-field quantities sampled on a spherical (θ, φ) grid at fixed radius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarFieldPattern {
    /// Frequency at which the pattern was computed (Hz).
    pub frequency: f64,
    /// Observation radius (µm).
    pub radius: f64,
    /// Polar angles θ ∈ [0, π] (radians), one per sample.
    pub theta: Vec<f64>,
    /// Azimuthal angles φ ∈ [0, 2π) (radians), one per sample.
    pub phi: Vec<f64>,
    /// Radar cross section at each (θ, φ).
    pub rcs: Vec<f64>,
    /// Time-averaged radial power density at each (θ, φ).
    pub power: Vec<f64>,
    /// Number of θ samples.
    pub n_theta: usize,
    /// Number of φ samples.
    pub n_phi: usize,
}
