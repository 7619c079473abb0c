//! Radiation vectors from equivalent surface currents.
//!
//! In the far field the observation direction $\hat{\mathbf{r}}(\theta, \phi)$
//! is the same for every source point, so the propagation phase reduces to a
//! Fourier kernel referenced to a common origin $\mathbf{r}_0$:
//!
//! $$ \mathbf{N} = \int_S \mathbf{J}(\mathbf{r}')\,
//!    e^{-s j k_0 \hat{\mathbf{r}} \cdot (\mathbf{r}' - \mathbf{r}_0)}\, dS' $$
//!
//! and likewise $\mathbf{L}$ with $\mathbf{M}$, where $s$ is the phase
//! convention sign. Using one origin for every monitor lets contributions
//! from several surfaces add coherently.

use ndarray::Array2;
use num_complex::Complex64;

use crate::currents::MonitorSurfaceSample;
use crate::types::{PhaseConvention, RadiationVectors};

/// Trapezoidal rule for complex samples `y` at abscissae `x`.
///
/// Fewer than two samples integrate to zero.
pub fn trapezoid(y: &[Complex64], x: &[f64]) -> Complex64 {
    y.windows(2)
        .zip(x.windows(2))
        .map(|(yy, xx)| (yy[0] + yy[1]) * (0.5 * (xx[1] - xx[0])))
        .sum()
}

/// Integrate `values · phase` over a `(u, v)` grid: first along `u`
/// (array axis 0) for every `v`, then along `v`.
fn integrate_surface(
    values: &Array2<Complex64>,
    phase: &Array2<Complex64>,
    u: &[f64],
    v: &[f64],
) -> Complex64 {
    let (nu, nv) = values.dim();
    let mut column = Vec::with_capacity(nu);
    let inner: Vec<Complex64> = (0..nv)
        .map(|j| {
            column.clear();
            column.extend((0..nu).map(|i| values[[i, j]] * phase[[i, j]]));
            trapezoid(&column, u)
        })
        .collect();
    trapezoid(&inner, v)
}

/// Project a cartesian vector onto the θ̂ and φ̂ unit vectors.
fn project_transverse(
    a: &[Complex64; 3],
    sin_theta: f64,
    cos_theta: f64,
    sin_phi: f64,
    cos_phi: f64,
) -> (Complex64, Complex64) {
    let a_theta = a[0] * (cos_theta * cos_phi) + a[1] * (cos_theta * sin_phi) - a[2] * sin_theta;
    let a_phi = -a[0] * sin_phi + a[1] * cos_phi;
    (a_theta, a_phi)
}

/// Radiation vectors of a single monitor towards (θ, φ), referenced to `origin`.
pub fn radiation_vectors_for_sample(
    sample: &MonitorSurfaceSample,
    origin: &[f64; 3],
    k0: f64,
    convention: PhaseConvention,
    theta: f64,
    phi: f64,
) -> RadiationVectors {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let r_hat = [sin_theta * cos_phi, sin_theta * sin_phi, cos_theta];

    let grid = &sample.grid;
    let normal = grid.normal_axis.index();
    let [axis_u, axis_v] = grid.tangential_axes();
    let (iu, iv) = (axis_u.index(), axis_v.index());

    // Path difference r̂·(r' − r₀), split into the constant normal offset
    // and the in-plane part.
    let w0 = (grid.normal_coordinate - origin[normal]) * r_hat[normal];
    let k_phase = -convention.sign() * k0;
    let phase = Array2::from_shape_fn(grid.shape(), |(i, j)| {
        let path = w0 + (grid.u[i] - origin[iu]) * r_hat[iu] + (grid.v[j] - origin[iv]) * r_hat[iv];
        Complex64::new(0.0, k_phase * path).exp()
    });

    let zero = Complex64::new(0.0, 0.0);
    let mut j_vec = [zero; 3];
    let mut m_vec = [zero; 3];
    for (c, axis) in [iu, iv].into_iter().enumerate() {
        j_vec[axis] = integrate_surface(&sample.j[c], &phase, &grid.u, &grid.v);
        m_vec[axis] = integrate_surface(&sample.m[c], &phase, &grid.u, &grid.v);
    }

    let (n_theta, n_phi) = project_transverse(&j_vec, sin_theta, cos_theta, sin_phi, cos_phi);
    let (l_theta, l_phi) = project_transverse(&m_vec, sin_theta, cos_theta, sin_phi, cos_phi);

    RadiationVectors {
        n_theta,
        n_phi,
        l_theta,
        l_phi,
    }
}

/// Radiation vectors of several monitors, summed with a shared origin.
pub fn radiation_vectors(
    samples: &[MonitorSurfaceSample],
    origin: &[f64; 3],
    k0: f64,
    convention: PhaseConvention,
    theta: f64,
    phi: f64,
) -> RadiationVectors {
    samples
        .iter()
        .map(|sample| radiation_vectors_for_sample(sample, origin, k0, convention, theta, phi))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nf2ff_geometry::{CollocationGrid, NormalDirection, SurfaceMonitor};

    fn uniform_sample(
        center: [f64; 3],
        size: [f64; 3],
        j: Complex64,
        m: Complex64,
    ) -> MonitorSurfaceSample {
        let mon = SurfaceMonitor::new("s", center, size);
        let grid = CollocationGrid::for_monitor(&mon, 1.0, 10).unwrap();
        let shape = grid.shape();
        MonitorSurfaceSample {
            monitor_name: mon.name.clone(),
            normal_direction: NormalDirection::Positive,
            center,
            grid,
            j: [Array2::from_elem(shape, j), Array2::zeros(shape)],
            m: [Array2::zeros(shape), Array2::from_elem(shape, m)],
        }
    }

    #[test]
    fn test_trapezoid_linear_is_exact() {
        let x = [0.0, 0.5, 2.0];
        let y: Vec<Complex64> = x.iter().map(|&x| Complex64::new(3.0 * x, -x)).collect();
        let integral = trapezoid(&y, &x);
        assert_relative_eq!(integral.re, 6.0, epsilon = 1e-12);
        assert_relative_eq!(integral.im, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_trapezoid_single_point_is_zero() {
        assert_eq!(trapezoid(&[Complex64::new(5.0, 5.0)], &[1.0]), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_broadside_integral_is_area() {
        // z-normal 2 x 1 plate, Jx = 1, My = 2: along +z the phase is flat and
        // θ̂ = x̂, φ̂ = ŷ at φ = 0.
        let one = Complex64::new(1.0, 0.0);
        let sample = uniform_sample([0.0, 0.0, 0.0], [2.0, 1.0, 0.0], one, 2.0 * one);
        let k0 = 2.0 * std::f64::consts::PI;
        let convention = PhaseConvention::Positive;
        let rv = radiation_vectors_for_sample(&sample, &[0.0; 3], k0, convention, 0.0, 0.0);

        assert_relative_eq!(rv.n_theta.re, 2.0, epsilon = 1e-12);
        assert_relative_eq!(rv.n_phi.norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(rv.l_theta.norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(rv.l_phi.re, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normal_offset_is_a_pure_phase() {
        let one = Complex64::new(1.0, 0.0);
        let k0 = 2.0 * std::f64::consts::PI;
        let at_origin = uniform_sample([0.0, 0.0, 0.0], [1.0, 1.0, 0.0], one, one);
        let shifted = uniform_sample([0.0, 0.0, 0.25], [1.0, 1.0, 0.0], one, one);

        let convention = PhaseConvention::Positive;
        let a = radiation_vectors_for_sample(&at_origin, &[0.0; 3], k0, convention, 0.0, 0.0);
        let b = radiation_vectors_for_sample(&shifted, &[0.0; 3], k0, convention, 0.0, 0.0);

        // Quarter-wave offset along the observation direction: factor e^{-jπ/2} = −j.
        let expected = a.scale(Complex64::new(0.0, -1.0));
        assert_relative_eq!((b.n_theta - expected.n_theta).norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!((b.l_phi - expected.l_phi).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sum_over_samples() {
        let one = Complex64::new(1.0, 0.0);
        let k0 = 2.0 * std::f64::consts::PI;
        let a = uniform_sample([0.0, 0.0, 0.5], [1.0, 1.0, 0.0], one, one);
        let b = uniform_sample([0.3, 0.0, -0.5], [1.0, 1.0, 0.0], 2.0 * one, -one);
        let origin = [0.15, 0.0, 0.0];
        let (theta, phi) = (0.4, 1.1);

        let convention = PhaseConvention::Negative;

        let total = radiation_vectors(&[a.clone(), b.clone()], &origin, k0, convention, theta, phi);
        let parts = radiation_vectors_for_sample(&a, &origin, k0, convention, theta, phi)
            + radiation_vectors_for_sample(&b, &origin, k0, convention, theta, phi);
        assert_eq!(total, parts);
    }
}
