#![warn(non_snake_case)]
//! # sightgrid
//!
//! Command-line front end for the layout generator. Reads a level
//! specification as JSON (or uses the built-in example), generates a grid
//! layout and prints it, optionally writing the exporter hand-off JSON.
//!
//! Logging goes through `env_logger`; `RUST_LOG` controls verbosity and
//! `-v` raises the default to `debug`.

use clap::{Parser, Subcommand};
use log::{error, info};
use sightgrid::{generate_batch, GeneratedLevel, LevelGenerator, LevelSpec};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sightgrid")]
#[command(version)]
#[command(about = "Procedural tactical map layouts with bounded sightlines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one layout and print it
    Generate {
        /// Level specification JSON (built-in example if omitted)
        #[arg(short, long)]
        spec: Option<PathBuf>,

        /// Seed for the random stream
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Write the exporter JSON document to this file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print the exporter JSON instead of the ASCII map
        #[arg(long)]
        json: bool,
    },

    /// Print the built-in example specification
    Example,

    /// Generate one layout per seed, in parallel, and summarise each
    Batch {
        /// Level specification JSON
        #[arg(short, long)]
        spec: PathBuf,

        /// Comma-separated seeds, e.g. 1,2,3
        #[arg(long, value_delimiter = ',', required = true)]
        seeds: Vec<u64>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn load_spec(path: Option<&Path>) -> Result<LevelSpec, Box<dyn Error>> {
    match path {
        Some(path) => {
            info!("Reading specification from {}", path.display());
            let text = fs::read_to_string(path)?;
            Ok(LevelSpec::from_json(&text)?)
        }
        None => {
            info!("No specification given, using the built-in example");
            Ok(LevelSpec::example())
        }
    }
}

fn summary_line(seed: u64, level: &GeneratedLevel) -> String {
    let s = &level.sightline_stats;
    format!(
        "seed {:>6}: {} zones, {} corridor, {} cover, sightlines h={} v={} d~{}",
        seed,
        level.zones.len(),
        level.stats.corridor_cells,
        level.stats.cover_cells,
        s.max_horizontal_sightline,
        s.max_vertical_sightline,
        s.estimated_max_diagonal
    )
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Generate { spec, seed, out, json } => {
            let generator = LevelGenerator::new(load_spec(spec.as_deref())?);
            let level = generator.generate_seeded(seed)?;
            let export = level.to_export_json(generator.spec())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&export)?);
            } else {
                print!("{}", level.render_ascii());
                println!("{}", summary_line(seed, &level));
            }
            if let Some(out) = out {
                fs::write(&out, serde_json::to_string_pretty(&export)?)?;
                info!("Wrote layout to {}", out.display());
            }
        }
        Commands::Example => {
            println!("{}", serde_json::to_string_pretty(&LevelSpec::example())?);
        }
        Commands::Batch { spec, seeds } => {
            let spec = load_spec(Some(spec.as_path()))?;
            for (seed, result) in seeds.iter().zip(generate_batch(&spec, &seeds)) {
                println!("{}", summary_line(*seed, &result?));
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
