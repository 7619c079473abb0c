//! Planar surface monitors.
//!
//! A surface monitor is an axis-aligned box with exactly one zero extent.
//! The zero-extent axis is the surface normal; the other two span the
//! surface. Which side of the surface is "outside" is declared explicitly
//! through [`NormalDirection`] rather than inferred from the monitor name.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::axis::Axis;

/// Errors raised while validating monitor geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Monitor '{monitor}' is not a surface (size = {size:?})")]
    NotASurface { monitor: String, size: [f64; 3] },

    #[error("Monitor '{monitor}' has non-finite or negative size {size:?}")]
    InvalidExtent { monitor: String, size: [f64; 3] },

    #[error("At least one surface monitor is required")]
    NoMonitors,
}

/// Orientation of a monitor's outward normal along its normal axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalDirection {
    /// Outward normal points along +axis.
    #[default]
    Positive,
    /// Outward normal points along −axis. Flips the sign of the equivalent
    /// surface currents.
    Negative,
}

impl NormalDirection {
    pub fn sign(self) -> f64 {
        match self {
            NormalDirection::Positive => 1.0,
            NormalDirection::Negative => -1.0,
        }
    }
}

/// An axis-aligned planar monitor that recorded near-field data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMonitor {
    /// Identifier used to look up the monitor's data and in diagnostics.
    pub name: String,
    /// Geometric centre (µm).
    pub center: [f64; 3],
    /// Extents along x, y, z (µm). Exactly one must be zero.
    pub size: [f64; 3],
    /// Outward normal orientation.
    #[serde(default)]
    pub normal_direction: NormalDirection,
}

impl SurfaceMonitor {
    /// Create a monitor with a positive-facing normal.
    pub fn new(name: impl Into<String>, center: [f64; 3], size: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            center,
            size,
            normal_direction: NormalDirection::Positive,
        }
    }

    pub fn with_normal_direction(mut self, normal_direction: NormalDirection) -> Self {
        self.normal_direction = normal_direction;
        self
    }

    /// Validate that this monitor is a surface and return its normal axis.
    ///
    /// The monitor must have exactly two nonzero extents. The normal is then
    /// taken as the thinnest dimension (argmin of the extents, first axis on
    /// ties) rather than by an exact zero test.
    pub fn normal_axis(&self) -> Result<Axis, GeometryError> {
        if self.size.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(GeometryError::InvalidExtent {
                monitor: self.name.clone(),
                size: self.size,
            });
        }

        let nonzero = self.size.iter().filter(|&&s| s != 0.0).count();
        if nonzero != 2 {
            return Err(GeometryError::NotASurface {
                monitor: self.name.clone(),
                size: self.size,
            });
        }

        let mut thinnest = Axis::X;
        for axis in [Axis::Y, Axis::Z] {
            if self.size[axis.index()] < self.size[thinnest.index()] {
                thinnest = axis;
            }
        }
        Ok(thinnest)
    }

    /// Extent of the monitor along `axis` (µm).
    pub fn extent(&self, axis: Axis) -> f64 {
        self.size[axis.index()]
    }

    /// Lower and upper bounds of the monitor along `axis` (µm).
    pub fn bounds(&self, axis: Axis) -> (f64, f64) {
        let c = self.center[axis.index()];
        let half = self.size[axis.index()] / 2.0;
        (c - half, c + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_axis_is_zero_extent() {
        let cases = [
            ([0.0, 2.0, 3.0], Axis::X),
            ([2.0, 0.0, 3.0], Axis::Y),
            ([2.0, 3.0, 0.0], Axis::Z),
        ];
        for (size, expected) in cases {
            let mon = SurfaceMonitor::new("m", [0.0; 3], size);
            assert_eq!(mon.normal_axis().unwrap(), expected);
        }
    }

    #[test]
    fn test_volume_monitor_is_rejected() {
        let mon = SurfaceMonitor::new("box", [0.0; 3], [1.0, 1.0, 1.0]);
        let err = mon.normal_axis().unwrap_err();
        assert!(matches!(err, GeometryError::NotASurface { .. }));
        assert!(err.to_string().contains("box"));
    }

    #[test]
    fn test_line_monitor_is_rejected() {
        let mon = SurfaceMonitor::new("line", [0.0; 3], [0.0, 0.0, 1.0]);
        assert!(matches!(mon.normal_axis(), Err(GeometryError::NotASurface { .. })));
    }

    #[test]
    fn test_negative_extent_is_rejected() {
        let mon = SurfaceMonitor::new("bad", [0.0; 3], [-1.0, 1.0, 0.0]);
        assert!(matches!(mon.normal_axis(), Err(GeometryError::InvalidExtent { .. })));
    }

    #[test]
    fn test_bounds() {
        let mon = SurfaceMonitor::new("m", [1.0, -2.0, 0.5], [4.0, 2.0, 0.0]);
        assert_eq!(mon.bounds(Axis::X), (-1.0, 3.0));
        assert_eq!(mon.bounds(Axis::Y), (-3.0, -1.0));
        assert_eq!(mon.bounds(Axis::Z), (0.5, 0.5));
    }

    #[test]
    fn test_normal_direction_defaults_to_positive_in_json() {
        let json = r#"{"name": "top", "center": [0, 0, 1], "size": [2, 2, 0]}"#;
        let mon: SurfaceMonitor = serde_json::from_str(json).unwrap();
        assert_eq!(mon.normal_direction, NormalDirection::Positive);

        let json = r#"{
            "name": "bottom",
            "center": [0, 0, -1],
            "size": [2, 2, 0],
            "normal_direction": "negative"
        }"#;
        let mon: SurfaceMonitor = serde_json::from_str(json).unwrap();
        assert_eq!(mon.normal_direction.sign(), -1.0);
    }
}
