//! Multilinear interpolation on rectilinear grids.
//!
//! Each target coordinate is reduced to a two-point [`Stencil`] along every
//! axis; the interpolated value is the weighted sum over the 2×2×2 corners.
//! Targets outside the recorded range are clamped to the nearest boundary
//! sample. An axis recorded at a single coordinate is treated as constant.

use ndarray::{Array4, ArrayView4};
use num_complex::Complex64;

/// Interpolation stencil along one axis: `(1 − t)·f[lo] + t·f[hi]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stencil {
    pub lo: usize,
    pub hi: usize,
    pub t: f64,
}

impl Stencil {
    /// The two (index, weight) pairs of this stencil.
    pub fn corners(&self) -> [(usize, f64); 2] {
        [(self.lo, 1.0 - self.t), (self.hi, self.t)]
    }
}

/// Locate `x` within the strictly increasing, non-empty `coords`.
pub fn stencil(coords: &[f64], x: f64) -> Stencil {
    let n = coords.len();
    if n == 1 || x <= coords[0] {
        return Stencil { lo: 0, hi: n.min(2) - 1, t: 0.0 };
    }
    if x >= coords[n - 1] {
        return Stencil { lo: n - 2, hi: n - 1, t: 1.0 };
    }

    // Binary search for the enclosing interval
    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if coords[mid] > x {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    let t = (x - coords[lo]) / (coords[hi] - coords[lo]);
    Stencil { lo, hi, t }
}

/// Resample `values`, shaped `(nx, ny, nz, nf)` over `coords`, onto the
/// spatial `targets`. The frequency axis is carried through unchanged.
pub fn colocate(
    values: ArrayView4<'_, Complex64>,
    coords: &[Vec<f64>; 3],
    targets: &[Vec<f64>; 3],
) -> Array4<Complex64> {
    let stencils: [Vec<Stencil>; 3] = [0, 1, 2].map(|axis| {
        targets[axis]
            .iter()
            .map(|&x| stencil(&coords[axis], x))
            .collect()
    });

    let nf = values.shape()[3];
    let shape = (stencils[0].len(), stencils[1].len(), stencils[2].len(), nf);

    Array4::from_shape_fn(shape, |(i, j, k, f)| {
        let mut acc = Complex64::new(0.0, 0.0);
        for (ix, wx) in stencils[0][i].corners() {
            for (iy, wy) in stencils[1][j].corners() {
                for (iz, wz) in stencils[2][k].corners() {
                    let w = wx * wy * wz;
                    if w != 0.0 {
                        acc += values[[ix, iy, iz, f]] * w;
                    }
                }
            }
        }
        acc
    })
}
