//! Tuner CLI
//!
//! Tune engine parameters with paired cutechess matches.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::path::PathBuf;
use tracing::{error, info};
use tuner::{CutechessRunner, PerturbationSampler, Tuner, TunerConfig};

#[derive(Parser, Debug)]
#[command(name = "tuner")]
#[command(about = "Paired-perturbation parameter tuner for UCI chess engines")]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a tuning session
    Run {
        /// TOML config file (built-in defaults when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the number of iterations
        #[arg(short = 'n', long)]
        iterations: Option<u32>,
        /// Seed for the random source
        #[arg(long)]
        seed: Option<u64>,
        /// Write the JSON run report here
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Print the default config as TOML
    DefaultConfig,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn run(
    config: Option<PathBuf>,
    iterations: Option<u32>,
    seed: Option<u64>,
    report: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config {
        Some(path) => TunerConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TunerConfig::default(),
    };
    if let Some(iterations) = iterations {
        config.iterations = iterations;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    if report.is_some() {
        config.report_path = report;
    }
    config.validate()?;

    let seed = config.seed.unwrap_or_else(|| StdRng::from_entropy().next_u64());
    info!(
        seed,
        iterations = config.iterations,
        variables = config.variables.len(),
        "starting tuning run"
    );

    let mut tuner = Tuner::new(
        config.variables.clone(),
        PerturbationSampler::new(config.sampler),
        CutechessRunner::new(config.match_config.clone()),
        StdRng::seed_from_u64(seed),
    )?;

    let mut report = tuner.run(config.iterations)?;
    report.seed = Some(seed);

    info!("Final values:");
    for value in &report.final_values {
        info!("{}: {}", value.name, value.value);
    }
    report.print_report();

    if let Some(path) = &config.report_path {
        report
            .save(path)
            .with_context(|| format!("writing report {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Command::Run {
            config,
            iterations,
            seed,
            report,
        } => {
            if let Err(e) = run(config, iterations, seed, report) {
                error!("Tuning run failed: {:#}", e);
                return Err(e);
            }
            Ok(())
        }
        Command::DefaultConfig => {
            print!("{}", TunerConfig::default().to_toml()?);
            Ok(())
        }
    }
}
