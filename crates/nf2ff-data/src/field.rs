//! Field components recorded by a monitor.

use std::collections::BTreeMap;
use std::fmt;

use ndarray::{Array3, Array4, Axis as ArrayAxis};
use nf2ff_geometry::Axis;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interp;

/// Errors from building field data containers.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Field values have shape {found:?} but the coordinates require {expected:?}")]
    ShapeMismatch {
        expected: [usize; 4],
        found: Vec<usize>,
    },

    #[error("No coordinates supplied along {axis}")]
    EmptyAxis { axis: &'static str },

    #[error("Coordinates along {axis} must be strictly increasing")]
    UnsortedCoordinates { axis: &'static str },
}

/// Identifier of a cartesian E or H field component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldComponent {
    Ex,
    Ey,
    Ez,
    Hx,
    Hy,
    Hz,
}

impl FieldComponent {
    pub const ALL: [FieldComponent; 6] = [
        FieldComponent::Ex,
        FieldComponent::Ey,
        FieldComponent::Ez,
        FieldComponent::Hx,
        FieldComponent::Hy,
        FieldComponent::Hz,
    ];

    /// Electric field component along `axis`.
    pub fn electric(axis: Axis) -> Self {
        match axis {
            Axis::X => FieldComponent::Ex,
            Axis::Y => FieldComponent::Ey,
            Axis::Z => FieldComponent::Ez,
        }
    }

    /// Magnetic field component along `axis`.
    pub fn magnetic(axis: Axis) -> Self {
        match axis {
            Axis::X => FieldComponent::Hx,
            Axis::Y => FieldComponent::Hy,
            Axis::Z => FieldComponent::Hz,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldComponent::Ex => "Ex",
            FieldComponent::Ey => "Ey",
            FieldComponent::Ez => "Ez",
            FieldComponent::Hx => "Hx",
            FieldComponent::Hy => "Hy",
            FieldComponent::Hz => "Hz",
        }
    }
}

impl fmt::Display for FieldComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single complex field component on a rectilinear grid.
///
/// Values are stored with shape `(nx, ny, nz, nf)`: three spatial axes
/// followed by frequency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawScalarFieldData")]
pub struct ScalarFieldData {
    coords: [Vec<f64>; 3],
    frequencies: Vec<f64>,
    values: Array4<Complex64>,
}

/// Unvalidated wire form; deserialisation goes through [`ScalarFieldData::new`].
#[derive(Deserialize)]
struct RawScalarFieldData {
    coords: [Vec<f64>; 3],
    frequencies: Vec<f64>,
    values: Array4<Complex64>,
}

impl TryFrom<RawScalarFieldData> for ScalarFieldData {
    type Error = DataError;

    fn try_from(raw: RawScalarFieldData) -> Result<Self, Self::Error> {
        Self::new(raw.coords, raw.frequencies, raw.values)
    }
}

impl ScalarFieldData {
    /// Wrap sampled values, checking that they match the coordinates.
    pub fn new(
        coords: [Vec<f64>; 3],
        frequencies: Vec<f64>,
        values: Array4<Complex64>,
    ) -> Result<Self, DataError> {
        for axis in Axis::ALL {
            let c = &coords[axis.index()];
            if c.is_empty() {
                return Err(DataError::EmptyAxis { axis: axis.label() });
            }
            if c.windows(2).any(|w| w[1] <= w[0]) {
                return Err(DataError::UnsortedCoordinates { axis: axis.label() });
            }
        }

        let expected = [coords[0].len(), coords[1].len(), coords[2].len(), frequencies.len()];
        if values.shape() != expected {
            return Err(DataError::ShapeMismatch {
                expected,
                found: values.shape().to_vec(),
            });
        }

        Ok(Self { coords, frequencies, values })
    }

    /// Sample a closure `(position, frequency) -> value` on the given grid.
    pub fn from_fn<F>(coords: [Vec<f64>; 3], frequencies: Vec<f64>, f: F) -> Result<Self, DataError>
    where
        F: Fn([f64; 3], f64) -> Complex64,
    {
        let shape = (coords[0].len(), coords[1].len(), coords[2].len(), frequencies.len());
        let values = Array4::from_shape_fn(shape, |(i, j, k, n)| {
            f([coords[0][i], coords[1][j], coords[2][k]], frequencies[n])
        });
        Self::new(coords, frequencies, values)
    }

    /// Recorded coordinates along `axis` (µm).
    pub fn coords(&self, axis: Axis) -> &[f64] {
        &self.coords[axis.index()]
    }

    /// Recorded frequencies (Hz).
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn values(&self) -> &Array4<Complex64> {
        &self.values
    }

    /// Resample onto the given x, y, z coordinates, keeping all frequencies.
    ///
    /// The targets must satisfy the same rules as recorded coordinates.
    pub fn colocate(&self, targets: &[Vec<f64>; 3]) -> Result<ScalarFieldData, DataError> {
        let values = interp::colocate(self.values.view(), &self.coords, targets);
        Self::new(targets.clone(), self.frequencies.clone(), values)
    }

    /// Spatial samples at a recorded frequency, shape `(nx, ny, nz)`.
    ///
    /// Frequencies match within a relative tolerance of 1e-9; `None` when no
    /// recorded frequency matches.
    pub fn at_frequency(&self, frequency: f64) -> Option<Array3<Complex64>> {
        let tol = 1e-9 * frequency.abs().max(f64::MIN_POSITIVE);
        let index = self
            .frequencies
            .iter()
            .position(|&f| (f - frequency).abs() <= tol)?;
        Some(self.values.index_axis(ArrayAxis(3), index).to_owned())
    }

    /// Multiply every sample by a complex constant.
    pub fn scaled(&self, factor: Complex64) -> ScalarFieldData {
        ScalarFieldData {
            coords: self.coords.clone(),
            frequencies: self.frequencies.clone(),
            values: self.values.mapv(|v| v * factor),
        }
    }
}

/// All field components recorded by one monitor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldData {
    components: BTreeMap<FieldComponent, ScalarFieldData>,
}

impl FieldData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion of a component.
    pub fn with_component(mut self, component: FieldComponent, data: ScalarFieldData) -> Self {
        self.insert(component, data);
        self
    }

    pub fn insert(&mut self, component: FieldComponent, data: ScalarFieldData) {
        self.components.insert(component, data);
    }

    pub fn get(&self, component: FieldComponent) -> Option<&ScalarFieldData> {
        self.components.get(&component)
    }

    pub fn contains(&self, component: FieldComponent) -> bool {
        self.components.contains_key(&component)
    }

    /// Stored component identifiers, in E-then-H, x-y-z order.
    pub fn components(&self) -> impl Iterator<Item = FieldComponent> + '_ {
        self.components.keys().copied()
    }

    /// Sorted union of the frequencies recorded by any component.
    pub fn frequencies(&self) -> Vec<f64> {
        let mut freqs: Vec<f64> = self
            .components
            .values()
            .flat_map(|c| c.frequencies().iter().copied())
            .collect();
        freqs.sort_by(|a, b| a.total_cmp(b));
        freqs.dedup();
        freqs
    }

    /// Resample every component onto the given x, y, z coordinates.
    pub fn colocate(&self, targets: &[Vec<f64>; 3]) -> Result<FieldData, DataError> {
        let components = self
            .components
            .iter()
            .map(|(&name, data)| Ok((name, data.colocate(targets)?)))
            .collect::<Result<_, DataError>>()?;
        Ok(FieldData { components })
    }

    /// Multiply every component by a complex constant.
    pub fn scaled(&self, factor: Complex64) -> FieldData {
        FieldData {
            components: self
                .components
                .iter()
                .map(|(&name, data)| (name, data.scaled(factor)))
                .collect(),
        }
    }
}
