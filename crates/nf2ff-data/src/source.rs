//! Near-field data sources.
//!
//! A source maps monitor names to the field data they recorded. Lookup
//! failures are reported with [`MissingDataError`], which keeps a missing
//! monitor distinct from a missing component or frequency within a monitor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::{FieldComponent, FieldData};

/// Required near-field data is absent.
#[derive(Debug, Error)]
pub enum MissingDataError {
    #[error("No data for monitor named '{0}' found in the supplied dataset")]
    MonitorNotFound(String),

    #[error("Monitor '{monitor}' doesn't store the required {component} field values")]
    ComponentNotFound {
        monitor: String,
        component: FieldComponent,
    },

    #[error("Frequency {frequency:e} Hz not found in {component} from monitor '{monitor}'")]
    FrequencyNotFound {
        monitor: String,
        component: FieldComponent,
        frequency: f64,
    },
}

/// Provides recorded near-field data by monitor name.
pub trait NearFieldSource: Send + Sync {
    /// Field data recorded by the named monitor.
    fn field_data(&self, monitor: &str) -> Result<&FieldData, MissingDataError>;

    /// Names of all monitors with data.
    fn monitor_names(&self) -> Vec<&str>;
}

/// In-memory dataset of monitor field data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationData {
    monitors: BTreeMap<String, FieldData>,
}

impl SimulationData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion of a monitor's data.
    pub fn with_monitor(mut self, name: impl Into<String>, data: FieldData) -> Self {
        self.insert(name, data);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, data: FieldData) {
        self.monitors.insert(name.into(), data);
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl NearFieldSource for SimulationData {
    fn field_data(&self, monitor: &str) -> Result<&FieldData, MissingDataError> {
        self.monitors
            .get(monitor)
            .ok_or_else(|| MissingDataError::MonitorNotFound(monitor.to_string()))
    }

    fn monitor_names(&self) -> Vec<&str> {
        self.monitors.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_monitor_is_reported_by_name() {
        let data = SimulationData::new().with_monitor("top", FieldData::new());
        assert!(data.field_data("top").is_ok());

        let err = data.field_data("bottom").unwrap_err();
        assert!(matches!(err, MissingDataError::MonitorNotFound(ref name) if name == "bottom"));
        assert!(err.to_string().contains("bottom"));
    }

    #[test]
    fn test_monitor_names_are_sorted() {
        let data = SimulationData::new()
            .with_monitor("z+", FieldData::new())
            .with_monitor("x-", FieldData::new());
        assert_eq!(data.monitor_names(), vec!["x-", "z+"]);
        assert_eq!(data.len(), 2);
    }
}
