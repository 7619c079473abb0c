//! Equivalent surface currents on monitor surfaces.
//!
//! By the surface equivalence principle the fields outside a surface are
//! reproduced by the currents
//!
//! $$ \mathbf{J} = \hat{\mathbf{n}} \times \mathbf{H}, \qquad
//!    \mathbf{M} = -\hat{\mathbf{n}} \times \mathbf{E} $$
//!
//! For an axis-aligned normal only the two tangential components survive.
//! With tangential axes (u, v) and orientation signs $(s_u, s_v)$:
//!
//! $$ \mathbf{J} = (s_u H_v,\ s_v H_u), \qquad \mathbf{M} = (s_v E_v,\ s_u E_u) $$

use log::debug;
use ndarray::{Array2, Axis as ArrayAxis};
use num_complex::Complex64;

use nf2ff_data::{FieldComponent, MissingDataError, NearFieldSource};
use nf2ff_geometry::{Axis, CollocationGrid, NormalDirection, SurfaceMonitor};

use crate::projection::SetupError;
use crate::types::C_0;

/// Equivalent currents of one monitor, sampled on its collocation grid.
#[derive(Debug, Clone)]
pub struct MonitorSurfaceSample {
    /// Name of the source monitor.
    pub monitor_name: String,
    pub normal_direction: NormalDirection,
    /// Geometric centre of the monitor (µm).
    pub center: [f64; 3],
    /// Integration mesh; carries the normal axis.
    pub grid: CollocationGrid,
    /// Electric surface current along the two tangential axes.
    pub j: [Array2<Complex64>; 2],
    /// Magnetic surface current along the two tangential axes.
    pub m: [Array2<Complex64>; 2],
}

impl MonitorSurfaceSample {
    pub fn normal_axis(&self) -> Axis {
        self.grid.normal_axis
    }

    /// Shape `(n_u, n_v)` shared by the grid and every current array.
    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }
}

/// Orientation signs `(s_u, s_v)` realising $\hat{\mathbf{n}} \times$ for a
/// normal along `normal_axis`, flipped for an inward-facing normal.
pub fn orientation_signs(normal_axis: Axis, direction: NormalDirection) -> [f64; 2] {
    let signs = match normal_axis {
        Axis::X => [-1.0, 1.0],
        Axis::Y => [1.0, -1.0],
        Axis::Z => [-1.0, 1.0],
    };
    signs.map(|s| s * direction.sign())
}

/// Extract the equivalent surface currents of `monitor` at `frequency`.
///
/// Validates the monitor geometry, builds its collocation grid at
/// `points_per_wavelength`, resamples the tangential E and H components onto
/// it and applies the orientation signs.
pub fn extract_surface_currents<S>(
    source: &S,
    monitor: &SurfaceMonitor,
    frequency: f64,
    points_per_wavelength: usize,
) -> Result<MonitorSurfaceSample, SetupError>
where
    S: NearFieldSource + ?Sized,
{
    let normal_axis = monitor.normal_axis()?;
    let field_data = source.field_data(&monitor.name)?;

    let [axis_u, axis_v] = normal_axis.tangential();
    let electric = [FieldComponent::electric(axis_u), FieldComponent::electric(axis_v)];
    let magnetic = [FieldComponent::magnetic(axis_u), FieldComponent::magnetic(axis_v)];

    for component in electric.into_iter().chain(magnetic) {
        if !field_data.contains(component) {
            return Err(MissingDataError::ComponentNotFound {
                monitor: monitor.name.clone(),
                component,
            }
            .into());
        }
    }

    let grid = CollocationGrid::for_monitor(monitor, C_0 / frequency, points_per_wavelength)?;
    let targets = grid.coordinates();

    // Resample one component onto the grid at the operating frequency and
    // drop the singleton normal axis.
    let tangential = |component: FieldComponent| -> Result<Array2<Complex64>, SetupError> {
        let data = field_data
            .get(component)
            .ok_or_else(|| MissingDataError::ComponentNotFound {
                monitor: monitor.name.clone(),
                component,
            })?;
        let values = data
            .colocate(&targets)?
            .at_frequency(frequency)
            .ok_or_else(|| MissingDataError::FrequencyNotFound {
                monitor: monitor.name.clone(),
                component,
                frequency,
            })?;
        Ok(values.index_axis(ArrayAxis(normal_axis.index()), 0).to_owned())
    };

    let e_u = tangential(electric[0])?;
    let e_v = tangential(electric[1])?;
    let h_u = tangential(magnetic[0])?;
    let h_v = tangential(magnetic[1])?;

    let [s_u, s_v] = orientation_signs(normal_axis, monitor.normal_direction);

    debug!(
        "Monitor '{}': normal {} ({:?}), grid {:?}",
        monitor.name,
        normal_axis,
        monitor.normal_direction,
        grid.shape()
    );

    Ok(MonitorSurfaceSample {
        monitor_name: monitor.name.clone(),
        normal_direction: monitor.normal_direction,
        center: monitor.center,
        grid,
        j: [h_v.mapv_into(|h| h * s_u), h_u.mapv_into(|h| h * s_v)],
        m: [e_v.mapv_into(|e| e * s_v), e_u.mapv_into(|e| e * s_u)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf2ff_data::{FieldData, ScalarFieldData, SimulationData};

    const FREQ: f64 = C_0; // λ = 1 µm

    // Recorded at a single point, so colocation is an exact broadcast.
    fn constant(value: Complex64) -> ScalarFieldData {
        ScalarFieldData::from_fn(
            [vec![0.0], vec![0.0], vec![0.0]],
            vec![FREQ],
            move |_, _| value,
        )
        .unwrap()
    }

    fn all_components() -> FieldData {
        FieldComponent::ALL
            .iter()
            .enumerate()
            .fold(FieldData::new(), |data, (i, &c)| {
                data.with_component(c, constant(Complex64::new(i as f64 + 1.0, 0.0)))
            })
    }

    /// Cross product n̂ × a for real 3-vectors.
    fn cross(n: [f64; 3], a: [f64; 3]) -> [f64; 3] {
        [
            n[1] * a[2] - n[2] * a[1],
            n[2] * a[0] - n[0] * a[2],
            n[0] * a[1] - n[1] * a[0],
        ]
    }

    #[test]
    fn test_signs_realise_cross_product() {
        // J = n̂ × H must equal (s_u H_v, s_v H_u) on the tangential axes.
        let h = [1.0, 2.0, 3.0];
        for normal in Axis::ALL {
            let mut n = [0.0; 3];
            n[normal.index()] = 1.0;
            let expected = cross(n, h);

            let [u, v] = normal.tangential();
            let [s_u, s_v] = orientation_signs(normal, NormalDirection::Positive);
            assert_eq!(s_u * h[v.index()], expected[u.index()], "normal {normal}, u");
            assert_eq!(s_v * h[u.index()], expected[v.index()], "normal {normal}, v");
        }
    }

    #[test]
    fn test_negative_normal_flips_signs() {
        for normal in Axis::ALL {
            let pos = orientation_signs(normal, NormalDirection::Positive);
            let neg = orientation_signs(normal, NormalDirection::Negative);
            assert_eq!(neg, [-pos[0], -pos[1]]);
        }
    }

    #[test]
    fn test_currents_match_grid_shape() {
        let data = SimulationData::new().with_monitor("y-plane", all_components());
        let mon = SurfaceMonitor::new("y-plane", [0.0, 0.5, 0.0], [1.5, 0.0, 0.7]);
        let sample = extract_surface_currents(&data, &mon, FREQ, 10).unwrap();

        assert_eq!(sample.normal_axis(), Axis::Y);
        assert_eq!(sample.shape(), (15, 7));
        for arr in sample.j.iter().chain(sample.m.iter()) {
            assert_eq!(arr.dim(), sample.shape());
        }

        // Normal y: u = x, v = z, signs (+1, −1).
        // Ex=1, Ez=3, Hx=4, Hz=6.
        assert_eq!(sample.j[0][[0, 0]], Complex64::new(6.0, 0.0));
        assert_eq!(sample.j[1][[3, 2]], Complex64::new(-4.0, 0.0));
        assert_eq!(sample.m[0][[1, 1]], Complex64::new(-3.0, 0.0));
        assert_eq!(sample.m[1][[14, 6]], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_missing_component_names_monitor() {
        let data = SimulationData::new().with_monitor(
            "top",
            FieldData::new()
                .with_component(FieldComponent::Ex, constant(Complex64::new(1.0, 0.0)))
                .with_component(FieldComponent::Ey, constant(Complex64::new(1.0, 0.0)))
                .with_component(FieldComponent::Hx, constant(Complex64::new(1.0, 0.0))),
        );
        let mon = SurfaceMonitor::new("top", [0.0; 3], [1.0, 1.0, 0.0]);
        let err = extract_surface_currents(&data, &mon, FREQ, 10).unwrap_err();

        assert!(err.is_missing_data());
        let msg = err.to_string();
        assert!(msg.contains("top") && msg.contains("Hy"), "{msg}");
    }

    #[test]
    fn test_missing_frequency_names_monitor_and_frequency() {
        let data = SimulationData::new().with_monitor("top", all_components());
        let mon = SurfaceMonitor::new("top", [0.0; 3], [1.0, 1.0, 0.0]);
        let err = extract_surface_currents(&data, &mon, 2.0 * FREQ, 10).unwrap_err();

        match err {
            SetupError::MissingData(MissingDataError::FrequencyNotFound {
                ref monitor,
                frequency,
                ..
            }) => {
                assert_eq!(monitor, "top");
                assert_eq!(frequency, 2.0 * FREQ);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
