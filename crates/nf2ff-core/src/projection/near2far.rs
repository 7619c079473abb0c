//! Near-field to far-field projection from surface monitors.

use log::info;

use nf2ff_data::NearFieldSource;
use nf2ff_geometry::coords::centroid;
use nf2ff_geometry::{GeometryError, SurfaceMonitor};

use super::{FarFieldProjector, SetupError};
use crate::currents::{extract_surface_currents, MonitorSurfaceSample};
use crate::fields::compute_far_field_pattern;
use crate::radiation::{radiation_vectors, radiation_vectors_for_sample};
use crate::types::{FarFieldPattern, PhaseConvention, ProjectionParams, RadiationVectors};

/// Projector over equivalent currents extracted from recorded monitors.
///
/// All currents are extracted at construction; afterwards the projector is
/// read-only and queries may run concurrently. A different frequency needs a
/// new projector.
#[derive(Debug, Clone)]
pub struct Near2Far {
    params: ProjectionParams,
    wavenumber: f64,
    samples: Vec<MonitorSurfaceSample>,
    origin: [f64; 3],
}

impl Near2Far {
    /// Build a projector at `frequency` with default sampling and phase convention.
    pub fn new<S>(
        source: &S,
        monitors: &[SurfaceMonitor],
        frequency: f64,
    ) -> Result<Self, SetupError>
    where
        S: NearFieldSource + ?Sized,
    {
        Self::with_params(source, monitors, ProjectionParams::new(frequency))
    }

    /// Build a projector with explicit parameters.
    ///
    /// Fails on the first monitor that is not a surface or lacks data; no
    /// partially built projector is returned.
    pub fn with_params<S>(
        source: &S,
        monitors: &[SurfaceMonitor],
        params: ProjectionParams,
    ) -> Result<Self, SetupError>
    where
        S: NearFieldSource + ?Sized,
    {
        if !(params.frequency.is_finite() && params.frequency > 0.0) {
            return Err(SetupError::InvalidParameter(format!(
                "frequency must be positive and finite, got {}",
                params.frequency
            )));
        }
        if params.points_per_wavelength == 0 {
            return Err(SetupError::InvalidParameter(
                "points_per_wavelength must be at least 1".to_string(),
            ));
        }

        let samples = monitors
            .iter()
            .map(|monitor| {
                extract_surface_currents(
                    source,
                    monitor,
                    params.frequency,
                    params.points_per_wavelength,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let centers: Vec<[f64; 3]> = samples.iter().map(|s| s.center).collect();
        let origin = centroid(&centers).ok_or(GeometryError::NoMonitors)?;
        let wavenumber = params.wavenumber();

        info!(
            "Near2Far: {} monitor(s) at {:.4e} Hz, k0 = {:.4} µm⁻¹, origin = {:?}",
            samples.len(),
            params.frequency,
            wavenumber,
            origin
        );

        Ok(Self {
            params,
            wavenumber,
            samples,
            origin,
        })
    }

    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    /// Extracted per-monitor currents, in input order.
    pub fn samples(&self) -> &[MonitorSurfaceSample] {
        &self.samples
    }

    /// Free-space wavelength (µm).
    pub fn wavelength(&self) -> f64 {
        self.params.wavelength()
    }

    /// Radiation vectors of a single extracted monitor, referenced to this
    /// projector's origin.
    pub fn sample_radiation_vectors(
        &self,
        sample: &MonitorSurfaceSample,
        theta: f64,
        phi: f64,
    ) -> RadiationVectors {
        radiation_vectors_for_sample(
            sample,
            &self.origin,
            self.wavenumber,
            self.params.phase_convention,
            theta,
            phi,
        )
    }

    /// RCS and power density on an `n_theta × n_phi` angular grid at `radius`.
    pub fn far_field_pattern(&self, radius: f64, n_theta: usize, n_phi: usize) -> FarFieldPattern {
        compute_far_field_pattern(self, radius, n_theta, n_phi)
    }
}

impl FarFieldProjector for Near2Far {
    fn frequency(&self) -> f64 {
        self.params.frequency
    }

    fn wavenumber(&self) -> f64 {
        self.wavenumber
    }

    fn phase_convention(&self) -> PhaseConvention {
        self.params.phase_convention
    }

    fn origin(&self) -> [f64; 3] {
        self.origin
    }

    fn radiation_vectors(&self, theta: f64, phi: f64) -> RadiationVectors {
        radiation_vectors(
            &self.samples,
            &self.origin,
            self.wavenumber,
            self.params.phase_convention,
            theta,
            phi,
        )
    }
}
