//! Far-field E/H, power density and radar cross section from radiation vectors.
//!
//! With the propagation factor
//!
//! $$ \psi(r) = -s\,j k_0 \frac{e^{s j k_0 r}}{4\pi r} $$
//!
//! the transverse fields are
//!
//! $$ E_\theta = -\psi\,(L_\phi + \eta_0 N_\theta), \qquad
//!    E_\phi = \psi\,(L_\theta - \eta_0 N_\phi) $$
//!
//! and $\mathbf{H} = \hat{\mathbf{r}} \times \mathbf{E} / \eta_0$.

use std::f64::consts::PI;

use num_complex::Complex64;
use rayon::prelude::*;

use nf2ff_geometry::coords::{cartesian_to_spherical, spherical_to_cartesian};

use crate::projection::FarFieldProjector;
use crate::types::{FarFieldPattern, FieldVector, PhaseConvention, RadiationVectors, ETA_0};

/// Re-express the spherical point `(r, θ, φ)` relative to `origin`.
pub fn recenter(origin: &[f64; 3], r: f64, theta: f64, phi: f64) -> (f64, f64, f64) {
    let [x, y, z] = spherical_to_cartesian(r, theta, phi);
    cartesian_to_spherical(x - origin[0], y - origin[1], z - origin[2])
}

/// Outgoing spherical-wave factor at distance `r`.
pub fn propagation_factor(k0: f64, convention: PhaseConvention, r: f64) -> Complex64 {
    let s = convention.sign();
    let phase = Complex64::new(0.0, s * k0 * r).exp();
    Complex64::new(0.0, -s * k0) * phase / (4.0 * PI * r)
}

/// Spherical `(E, H)` at distance `r` radiated by `rv`. Radial components are zero.
pub fn radiated_fields(
    rv: &RadiationVectors,
    k0: f64,
    convention: PhaseConvention,
    r: f64,
) -> (FieldVector, FieldVector) {
    let scalar = propagation_factor(k0, convention, r);
    let zero = Complex64::new(0.0, 0.0);

    let e_theta = -scalar * (rv.l_phi + rv.n_theta * ETA_0);
    let e_phi = scalar * (rv.l_theta - rv.n_phi * ETA_0);
    let h_theta = -e_phi / ETA_0;
    let h_phi = e_theta / ETA_0;

    ([zero, e_theta, e_phi], [zero, h_theta, h_phi])
}

/// Time-averaged radial Poynting flux of spherical `(E, H)`.
pub fn poynting_power(e: &FieldVector, h: &FieldVector) -> f64 {
    0.5 * (e[1] * h[2].conj()).re + 0.5 * (-e[2] * h[1].conj()).re
}

/// Radar cross section of `rv`.
pub fn radar_cross_section(rv: &RadiationVectors, k0: f64) -> f64 {
    let constant = k0 * k0 / (8.0 * PI * ETA_0);
    let term1 = (rv.l_phi + rv.n_theta * ETA_0).norm_sqr();
    let term2 = (rv.l_theta - rv.n_phi * ETA_0).norm_sqr();
    constant * (term1 + term2)
}

/// Sample RCS and power on an `n_theta × n_phi` grid at `radius`.
///
/// Angles are measured about the projector's origin: θ spans [0, π]
/// inclusive, φ spans [0, 2π). Samples are stored θ-major. Each direction
/// needs one radiation-vector evaluation, and directions are evaluated in
/// parallel.
pub fn compute_far_field_pattern<P>(
    projector: &P,
    radius: f64,
    n_theta: usize,
    n_phi: usize,
) -> FarFieldPattern
where
    P: FarFieldProjector + Sync + ?Sized,
{
    let k0 = projector.wavenumber();
    let convention = projector.phase_convention();

    let samples: Vec<(f64, f64, f64, f64)> = (0..n_theta * n_phi)
        .into_par_iter()
        .map(|idx| {
            let it = idx / n_phi;
            let ip = idx % n_phi;
            let theta = PI * it as f64 / (n_theta.saturating_sub(1)).max(1) as f64;
            let phi = 2.0 * PI * ip as f64 / n_phi as f64;

            let rv = projector.radiation_vectors(theta, phi);
            let (e, h) = radiated_fields(&rv, k0, convention, radius);
            (theta, phi, radar_cross_section(&rv, k0), poynting_power(&e, &h))
        })
        .collect();

    let mut pattern = FarFieldPattern {
        frequency: projector.frequency(),
        radius,
        theta: Vec::with_capacity(samples.len()),
        phi: Vec::with_capacity(samples.len()),
        rcs: Vec::with_capacity(samples.len()),
        power: Vec::with_capacity(samples.len()),
        n_theta,
        n_phi,
    };
    for (theta, phi, rcs, power) in samples {
        pattern.theta.push(theta);
        pattern.phi.push(phi);
        pattern.rcs.push(rcs);
        pattern.power.push(power);
    }
    pattern
}
