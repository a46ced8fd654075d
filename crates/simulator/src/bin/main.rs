//! mmc queueing simulator CLI
//!
//! Runs one discrete-event simulation of an M/M/c queueing system and
//! prints its statistics. Reproducible when the same seed is used.
//!
//! # Example
//!
//! ```bash
//! # Run the configuration file with a fixed seed
//! mmc-sim --config config.json --seed 42
//!
//! # Override the pool size and target from the command line
//! mmc-sim --config config.json --processors 4 --target 100000
//! ```

use clap::Parser;
use mmc_core::{LogMode, SimulationConfig, SimulationError};
use mmc_simulator::{RunReport, Simulator};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// mmc queueing simulator
///
/// Simulates processes arriving at random intervals, served by a pool of
/// identical processors, queueing FIFO when all are busy.
#[derive(Parser, Debug)]
#[command(name = "mmc-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration JSON file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible results. When omitted, a random seed
    /// is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of processors (overrides the config file).
    #[arg(long)]
    processors: Option<usize>,

    /// Exponential service rate per processor (overrides the config file).
    #[arg(long)]
    service_rate: Option<f64>,

    /// Exponential arrival rate (overrides the config file).
    #[arg(long)]
    arrival_rate: Option<f64>,

    /// Stop once this many processes have been served (overrides the
    /// config file).
    #[arg(long)]
    target: Option<u64>,

    /// Log flags: 'E' appends the event trace to event.log, 'R' appends
    /// the statistics to results.log (overrides the config file).
    #[arg(long)]
    log: Option<LogMode>,
}

impl Args {
    /// Resolve the effective configuration: file first, flags on top.
    fn load_config(&self) -> Result<SimulationConfig, SimulationError> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    SimulationError::Configuration(format!(
                        "cannot read {}: {e}",
                        path.display()
                    ))
                })?;
                serde_json::from_str(&text).map_err(|e| {
                    SimulationError::Configuration(format!(
                        "cannot parse {}: {e}",
                        path.display()
                    ))
                })?
            }
            None => SimulationConfig {
                processor_count: 1,
                processor_service_rate: 1.0,
                process_arrival_rate: 1.0,
                target_process_count: 10_000,
                log: LogMode::default(),
            },
        };

        if let Some(processors) = self.processors {
            config.processor_count = processors;
        }
        if let Some(rate) = self.service_rate {
            config.processor_service_rate = rate;
        }
        if let Some(rate) = self.arrival_rate {
            config.process_arrival_rate = rate;
        }
        if let Some(target) = self.target {
            config.target_process_count = target;
        }
        if let Some(log) = self.log {
            config.log = log;
        }
        config.validate()?;
        Ok(config)
    }
}

fn append(path: &str, contents: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(contents.as_bytes())
}

fn write_logs(report: &RunReport, log: LogMode) -> std::io::Result<()> {
    if log.events {
        append("event.log", &report.render_events())?;
    }
    if log.results {
        let mut block = String::from("\n === New Simulation === \n");
        block.push_str(&report.render_statistics());
        append("results.log", &block)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut simulator = Simulator::new(config.clone());
    if let Some(seed) = args.seed {
        simulator = simulator.with_seed(seed);
    }

    info!(
        processors = config.processor_count,
        service_rate = config.processor_service_rate,
        arrival_rate = config.process_arrival_rate,
        target = config.target_process_count,
        seed = simulator.seed(),
        "starting simulation"
    );

    let report = match simulator.run() {
        Ok(report) => report,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    print!("{}", report.render_statistics());

    if let Err(e) = write_logs(&report, config.log) {
        error!("writing logs failed: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
