//! nf2ff command-line interface.
//!
//! Project recorded near fields to the far field from TOML job files:
//! ```sh
//! nf2ff run job.toml
//! nf2ff validate job.toml
//! nf2ff inspect near_field.json
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nf2ff")]
#[command(about = "Near-field to far-field projection from surface monitors")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a projection from a TOML configuration file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without loading data.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// List the monitors, components and frequencies in a JSON dataset.
    Inspect {
        /// Path to the dataset.
        data: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("nf2ff projection");
            println!("================");
            let job = config::load_config(&config)?;
            job.validate()?;
            println!("Configuration: {}", config.display());

            let data_path = job.data_path(&config);
            let data = runner::load_dataset(&data_path)?;
            println!("Dataset: {} ({} monitors)", data_path.display(), data.len());

            let result = runner::run_projection(&job, &data)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            runner::write_pattern_csv(&result, &out_dir.join("far_field.csv"), &job)?;
            if job.output.save_json {
                runner::write_pattern_json(&result.pattern, &out_dir.join("far_field.json"))?;
            }

            println!("Projection complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            job.validate()?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Inspect { data } => {
            let dataset = runner::load_dataset(&data)?;
            runner::inspect_dataset(&dataset)
        }
    }
}
