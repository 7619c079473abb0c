//! TOML configuration deserialisation for projection jobs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use nf2ff_core::types::ProjectionParams;
use nf2ff_geometry::SurfaceMonitor;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub projection: ProjectionParams,
    pub data: DataConfig,
    #[serde(rename = "monitor")]
    pub monitors: Vec<SurfaceMonitor>,
    #[serde(default)]
    pub observation: ObservationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Location of the recorded near-field dataset.
#[derive(Debug, Deserialize)]
pub struct DataConfig {
    /// JSON dataset path, relative to the job file unless absolute.
    pub path: PathBuf,
}

/// Angular sampling of the far-field pattern.
#[derive(Debug, Deserialize)]
pub struct ObservationConfig {
    /// Observation radius in µm (default: 1e6, i.e. 1 m).
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Polar samples over [0, π] (default: 91).
    #[serde(default = "default_n_theta")]
    pub n_theta: usize,
    /// Azimuthal samples over [0, 2π) (default: 72).
    #[serde(default = "default_n_phi")]
    pub n_phi: usize,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            n_theta: default_n_theta(),
            n_phi: default_n_phi(),
        }
    }
}

fn default_radius() -> f64 {
    1.0e6
}
fn default_n_theta() -> usize {
    91
}
fn default_n_phi() -> usize {
    72
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to also save the pattern as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}

impl JobConfig {
    /// Dataset path resolved against the directory holding the job file.
    pub fn data_path(&self, config_path: &Path) -> PathBuf {
        if self.data.path.is_absolute() {
            return self.data.path.clone();
        }
        config_path
            .parent()
            .map(|dir| dir.join(&self.data.path))
            .unwrap_or_else(|| self.data.path.clone())
    }

    /// Check everything that can be checked without loading the dataset.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.projection.frequency.is_finite() && self.projection.frequency > 0.0) {
            anyhow::bail!(
                "projection.frequency must be positive, got {}",
                self.projection.frequency
            );
        }
        if self.projection.points_per_wavelength == 0 {
            anyhow::bail!("projection.points_per_wavelength must be at least 1");
        }
        if self.monitors.is_empty() {
            anyhow::bail!("At least one [[monitor]] table is required");
        }
        for monitor in &self.monitors {
            monitor
                .normal_axis()
                .with_context(|| format!("Invalid monitor '{}'", monitor.name))?;
        }
        if self.observation.n_theta == 0 || self.observation.n_phi == 0 {
            anyhow::bail!("observation.n_theta and observation.n_phi must be at least 1");
        }
        Ok(())
    }
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf2ff_core::types::PhaseConvention;
    use nf2ff_geometry::NormalDirection;

    const JOB: &str = r#"
        [projection]
        frequency = 2.0e14
        phase_convention = "negative"

        [data]
        path = "near_field.json"

        [[monitor]]
        name = "top"
        center = [0.0, 0.0, 0.5]
        size = [2.0, 2.0, 0.0]

        [[monitor]]
        name = "bottom"
        center = [0.0, 0.0, -0.5]
        size = [2.0, 2.0, 0.0]
        normal_direction = "negative"

        [observation]
        n_theta = 37
    "#;

    #[test]
    fn test_parse_job_with_defaults() {
        let job: JobConfig = toml::from_str(JOB).unwrap();

        assert_eq!(job.projection.points_per_wavelength, 10);
        assert_eq!(job.projection.phase_convention, PhaseConvention::Negative);
        assert_eq!(job.monitors.len(), 2);
        assert_eq!(job.monitors[0].normal_direction, NormalDirection::Positive);
        assert_eq!(job.monitors[1].normal_direction, NormalDirection::Negative);
        assert_eq!(job.observation.n_theta, 37);
        assert_eq!(job.observation.n_phi, 72);
        assert_eq!(job.output.directory, "./output");
        assert!(job.validate().is_ok());
    }

    #[test]
    fn test_data_path_is_relative_to_job_file() {
        let job: JobConfig = toml::from_str(JOB).unwrap();
        let path = job.data_path(Path::new("/jobs/antenna/job.toml"));
        assert_eq!(path, PathBuf::from("/jobs/antenna/near_field.json"));
    }

    #[test]
    fn test_validate_rejects_volume_monitor() {
        let mut job: JobConfig = toml::from_str(JOB).unwrap();
        job.monitors[0].size = [1.0, 1.0, 1.0];
        let err = job.validate().unwrap_err();
        assert!(format!("{err:#}").contains("top"));
    }

    #[test]
    fn test_validate_rejects_zero_sampling() {
        let mut job: JobConfig = toml::from_str(JOB).unwrap();
        job.projection.points_per_wavelength = 0;
        let err = job.validate().unwrap_err();
        assert!(err.to_string().contains("points_per_wavelength"));
    }
}
