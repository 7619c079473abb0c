//! Collocation grids on surface monitors.
//!
//! The recorded near field is resampled onto a regular 2D mesh spanning the
//! monitor before integration. The mesh density is tied to the wavelength so
//! that the phase of the far-field kernel is resolved uniformly:
//!
//! $$ N_u = \left\lceil n_\lambda \frac{L_u}{\lambda} \right\rceil $$
//!
//! where $n_\lambda$ is the number of points per wavelength and $L_u$ the
//! monitor extent along the in-plane axis $u$.

use log::warn;

use crate::axis::Axis;
use crate::monitor::{GeometryError, SurfaceMonitor};

/// `num` evenly spaced samples over the closed interval `[start, stop]`.
///
/// A single sample sits at `start`; zero samples gives an empty vector.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut points: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            points[num - 1] = stop;
            points
        }
    }
}

/// Number of collocation points needed to cover `extent` at the given density.
pub fn points_along(extent: f64, wavelength: f64, points_per_wavelength: usize) -> usize {
    (points_per_wavelength as f64 * extent / wavelength).ceil() as usize
}

/// A regular 2D mesh lying on a surface monitor.
///
/// The mesh is the outer product of `u` and `v`, the sample coordinates along
/// the two tangential axes in ascending axis order. Arrays sampled on the
/// grid are indexed `[i_u, i_v]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CollocationGrid {
    pub normal_axis: Axis,
    /// Position of the surface along the normal axis (µm).
    pub normal_coordinate: f64,
    /// Samples along the first tangential axis (µm).
    pub u: Vec<f64>,
    /// Samples along the second tangential axis (µm).
    pub v: Vec<f64>,
}

impl CollocationGrid {
    /// Build the collocation grid for a monitor at the given wavelength.
    pub fn for_monitor(
        monitor: &SurfaceMonitor,
        wavelength: f64,
        points_per_wavelength: usize,
    ) -> Result<Self, GeometryError> {
        let normal_axis = monitor.normal_axis()?;
        let [axis_u, axis_v] = normal_axis.tangential();

        let sample_axis = |axis: Axis| {
            let num = points_along(monitor.extent(axis), wavelength, points_per_wavelength);
            if num < 2 {
                warn!(
                    "Monitor '{}' has a single sample along {}; its integral vanishes",
                    monitor.name, axis
                );
            }
            let (start, stop) = monitor.bounds(axis);
            linspace(start, stop, num)
        };

        Ok(Self {
            normal_axis,
            normal_coordinate: monitor.center[normal_axis.index()],
            u: sample_axis(axis_u),
            v: sample_axis(axis_v),
        })
    }

    /// Grid shape `(n_u, n_v)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.u.len(), self.v.len())
    }

    pub fn tangential_axes(&self) -> [Axis; 2] {
        self.normal_axis.tangential()
    }

    /// Sample coordinates along x, y, z. The normal axis holds the single
    /// surface coordinate; the tangential axes hold `u` and `v`.
    pub fn coordinates(&self) -> [Vec<f64>; 3] {
        let [axis_u, axis_v] = self.tangential_axes();
        let mut coords: [Vec<f64>; 3] = Default::default();
        coords[self.normal_axis.index()] = vec![self.normal_coordinate];
        coords[axis_u.index()] = self.u.clone();
        coords[axis_v.index()] = self.v.clone();
        coords
    }
}
