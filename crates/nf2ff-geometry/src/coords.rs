//! Spherical ⇄ cartesian conversions.
//!
//! Conventions: θ is the polar angle measured from +z, φ the azimuth measured
//! from +x in the x–y plane.
//!
//! $$ x = r\sin\theta\cos\phi,\quad y = r\sin\theta\sin\phi,\quad z = r\cos\theta $$

use nalgebra::{Matrix3, Vector3};
use num_complex::Complex64;

/// Convert a point from spherical `(r, θ, φ)` to cartesian `[x, y, z]`.
pub fn spherical_to_cartesian(r: f64, theta: f64, phi: f64) -> [f64; 3] {
    let r_sin_theta = r * theta.sin();
    [
        r_sin_theta * phi.cos(),
        r_sin_theta * phi.sin(),
        r * theta.cos(),
    ]
}

/// Convert a point from cartesian to spherical `(r, θ, φ)`.
///
/// θ ∈ [0, π] and φ ∈ (−π, π]. At the origin θ is NaN; callers that can
/// observe `r = 0` must guard against it.
pub fn cartesian_to_spherical(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let r = (x * x + y * y + z * z).sqrt();
    let theta = (z / r).acos();
    let phi = y.atan2(x);
    (r, theta, phi)
}

/// Orthonormal spherical basis at angles (θ, φ).
///
/// Columns are r̂, θ̂, φ̂ expressed in cartesian components, so the matrix maps
/// spherical vector components to cartesian ones.
#[rustfmt::skip]
pub fn spherical_basis(theta: f64, phi: f64) -> Matrix3<f64> {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    Matrix3::new(
        sin_t * cos_p, cos_t * cos_p, -sin_p,
        sin_t * sin_p, cos_t * sin_p, cos_p,
        cos_t,         -sin_t,        0.0,
    )
}

/// Rotate complex vector components `(A_r, A_θ, A_φ)` at (θ, φ) into
/// cartesian components `(A_x, A_y, A_z)`.
pub fn spherical_field_to_cartesian(
    field: &[Complex64; 3],
    theta: f64,
    phi: f64,
) -> [Complex64; 3] {
    let basis = spherical_basis(theta, phi);
    let re = basis * Vector3::new(field[0].re, field[1].re, field[2].re);
    let im = basis * Vector3::new(field[0].im, field[1].im, field[2].im);
    [
        Complex64::new(re.x, im.x),
        Complex64::new(re.y, im.y),
        Complex64::new(re.z, im.z),
    ]
}

/// Unweighted centroid of a set of points, `None` when empty.
pub fn centroid(points: &[[f64; 3]]) -> Option<[f64; 3]> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + Vector3::new(p[0], p[1], p[2]));
    let mean = sum / points.len() as f64;
    Some([mean.x, mean.y, mean.z])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_axes_map_to_expected_angles() {
        let (r, theta, phi) = cartesian_to_spherical(0.0, 0.0, 2.0);
        assert_relative_eq!(r, 2.0);
        assert_relative_eq!(theta, 0.0);
        assert_relative_eq!(phi, 0.0);

        let (_, theta, phi) = cartesian_to_spherical(0.0, 3.0, 0.0);
        assert_relative_eq!(theta, FRAC_PI_2);
        assert_relative_eq!(phi, FRAC_PI_2);

        let p = spherical_to_cartesian(1.0, PI, 0.0);
        assert_relative_eq!(p[2], -1.0);
    }

    #[test]
    fn test_origin_gives_nan_theta() {
        let (r, theta, _) = cartesian_to_spherical(0.0, 0.0, 0.0);
        assert_eq!(r, 0.0);
        assert!(theta.is_nan());
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let b = spherical_basis(0.7, -2.1);
        let identity = b.transpose() * b;
        assert_relative_eq!(identity, Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_radial_field_points_outward() {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let a = spherical_field_to_cartesian(&[one, zero, zero], FRAC_PI_4, FRAC_PI_4);
        let dir = spherical_to_cartesian(1.0, FRAC_PI_4, FRAC_PI_4);
        for c in 0..3 {
            assert_relative_eq!(a[c].re, dir[c], epsilon = 1e-12);
            assert_relative_eq!(a[c].im, 0.0);
        }
    }

    #[test]
    fn test_theta_component_at_equator_points_down() {
        let j = Complex64::new(0.0, 2.0);
        let zero = Complex64::new(0.0, 0.0);
        let a = spherical_field_to_cartesian(&[zero, j, zero], FRAC_PI_2, 0.0);
        assert_relative_eq!(a[2].im, -2.0, epsilon = 1e-12);
        assert_relative_eq!(a[0].norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_centroid() {
        assert_eq!(centroid(&[]), None);
        let c = centroid(&[[0.0, 0.0, 1.0], [2.0, 0.0, -1.0], [1.0, 3.0, 0.0]]).unwrap();
        assert_relative_eq!(c[0], 1.0);
        assert_relative_eq!(c[1], 1.0);
        assert_relative_eq!(c[2], 0.0);
    }
}
