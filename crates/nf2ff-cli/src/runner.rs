//! Projection runner: loads the dataset, builds the projector and writes results.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use nf2ff_core::types::FarFieldPattern;
use nf2ff_core::{FarFieldProjector, Near2Far};
use nf2ff_data::{NearFieldSource, SimulationData};

use crate::config::JobConfig;

/// Results from a projection run.
pub struct ProjectionOutput {
    pub pattern: FarFieldPattern,
    pub origin: [f64; 3],
}

/// Load a JSON near-field dataset.
pub fn load_dataset(path: &Path) -> Result<SimulationData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let data: SimulationData = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse dataset {}", path.display()))?;
    Ok(data)
}

/// Run a full projection from a parsed job configuration.
pub fn run_projection(job: &JobConfig, data: &SimulationData) -> Result<ProjectionOutput> {
    let n2f = Near2Far::with_params(data, &job.monitors, job.projection.clone())
        .context("Projection setup failed")?;

    for sample in n2f.samples() {
        let (nu, nv) = sample.shape();
        println!(
            "  Monitor '{}': normal {} ({:?}), {} x {} collocation points",
            sample.monitor_name,
            sample.normal_axis(),
            sample.normal_direction,
            nu,
            nv
        );
    }
    let origin = n2f.origin();
    println!(
        "Origin: ({:.4}, {:.4}, {:.4}) µm, λ = {:.4} µm",
        origin[0],
        origin[1],
        origin[2],
        n2f.wavelength()
    );

    let obs = &job.observation;
    info!(
        "Sampling {} x {} directions at r = {:.3e} µm",
        obs.n_theta, obs.n_phi, obs.radius
    );
    let pattern = n2f.far_field_pattern(obs.radius, obs.n_theta, obs.n_phi);

    if let Some((idx, peak)) = pattern
        .rcs
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))
    {
        println!(
            "Peak RCS {:.4e} µm² at θ = {:.1}°, φ = {:.1}°",
            peak,
            pattern.theta[idx].to_degrees(),
            pattern.phi[idx].to_degrees()
        );
    }

    Ok(ProjectionOutput { pattern, origin })
}

/// Write the far-field pattern to a CSV file with a metadata header.
pub fn write_pattern_csv(output: &ProjectionOutput, path: &Path, job: &JobConfig) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    let pattern = &output.pattern;

    // Metadata header
    writeln!(file, "# nf2ff far-field pattern")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# frequency_hz: {:e}", pattern.frequency)?;
    writeln!(file, "# radius_um: {:e}", pattern.radius)?;
    writeln!(file, "# phase_convention: {:?}", job.projection.phase_convention)?;
    writeln!(
        file,
        "# origin_um: {}, {}, {}",
        output.origin[0], output.origin[1], output.origin[2]
    )?;
    for monitor in &job.monitors {
        writeln!(
            file,
            "# monitor '{}': center={:?}, size={:?}, normal_direction={:?}",
            monitor.name, monitor.center, monitor.size, monitor.normal_direction
        )?;
    }
    writeln!(file, "#")?;
    writeln!(file, "theta_deg,phi_deg,rcs_um2,power_w_per_um2")?;

    for i in 0..pattern.rcs.len() {
        writeln!(
            file,
            "{:.4},{:.4},{:.6e},{:.6e}",
            pattern.theta[i].to_degrees(),
            pattern.phi[i].to_degrees(),
            pattern.rcs[i],
            pattern.power[i]
        )?;
    }

    println!("Pattern written to: {}", path.display());
    Ok(())
}

/// Write the far-field pattern to a JSON file.
pub fn write_pattern_json(pattern: &FarFieldPattern, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(pattern)?;
    std::fs::write(path, json)?;
    println!("Pattern JSON written to: {}", path.display());
    Ok(())
}

/// Print the monitors, field components and frequencies in a dataset.
pub fn inspect_dataset(data: &SimulationData) -> Result<()> {
    println!("{} monitor(s)", data.len());
    for name in data.monitor_names() {
        let fields = data.field_data(name)?;
        let components: Vec<&str> = fields.components().map(|c| c.name()).collect();
        let frequencies: Vec<String> = fields
            .frequencies()
            .iter()
            .map(|f| format!("{f:.4e}"))
            .collect();
        println!("  {name}");
        println!("    components:  {}", components.join(", "));
        println!("    frequencies: {} Hz", frequencies.join(", "));
    }
    Ok(())
}
