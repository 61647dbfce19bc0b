//! # Tracker HAL Binary
//!
//! Runs the 3-axis encoder tracker: polls an input driver, decodes
//! quadrature edges, samples speed and distance, and captures points on
//! button presses.
//!
//! # Usage
//!
//! ```bash
//! # Run with the simulation driver
//! tracker_hal --config config/tracker.toml --simulate
//!
//! # Write captured points on exit
//! tracker_hal -s --export points.txt
//!
//! # Verbose JSON logging
//! tracker_hal -s -v --json
//!
//! # Show the available drivers
//! tracker_hal --list-drivers
//! ```

#![deny(warnings)]

use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;
use tracker_common::config::{ConfigError, LogLevel, TrackerConfig};
use tracker_common::consts::DEFAULT_CONFIG_PATH;
use tracker_hal::core::TrackerCore;
use tracker_hal::drivers::builtin_registry;

/// Tracker HAL - 3-axis quadrature encoder tracker with point capture
#[derive(Parser, Debug)]
#[command(name = "tracker_hal")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "3-axis quadrature encoder tracker with button point capture")]
#[command(long_about = None)]
struct Args {
    /// Path to the tracker configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Force the simulation driver. Falls back to default settings when
    /// the configuration file is missing.
    #[arg(short = 's', long)]
    simulate: bool,

    /// Input driver to load.
    #[arg(short, long, default_value = "simulation")]
    driver: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,

    /// Write captured points to this file on shutdown.
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Print the available drivers and exit.
    #[arg(long)]
    list_drivers: bool,
}

fn main() {
    let args = Args::parse();

    if args.list_drivers {
        for entry in builtin_registry().entries() {
            println!("{:<12} {}", entry.name, entry.summary);
        }
        return;
    }

    let loaded = load_config(&args);
    let level = match &loaded {
        Ok((config, _)) if !args.verbose => to_level(config.shared.log_level),
        _ if args.verbose => Level::DEBUG,
        _ => Level::INFO,
    };
    setup_tracing(level, args.json);

    info!("Tracker HAL v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = loaded
        .map_err(|e| -> Box<dyn std::error::Error> { Box::new(e) })
        .and_then(|(config, defaulted)| {
            if defaulted {
                warn!("Config {:?} not found, using default settings", args.config);
            }
            run(&args, config)
        });

    if let Err(e) = result {
        error!("Tracker startup failed: {}", e);
        std::process::exit(1);
    }
}

/// Load the configuration. With `--simulate` a missing file is replaced by
/// defaults; the flag in the result records that.
fn load_config(args: &Args) -> Result<(TrackerConfig, bool), ConfigError> {
    match TrackerConfig::load_validated(&args.config) {
        Ok(config) => Ok((config, false)),
        Err(ConfigError::FileNotFound) if args.simulate => {
            Ok((TrackerConfig::with_service_name("tracker-sim"), true))
        }
        Err(e) => Err(e),
    }
}

fn run(args: &Args, config: TrackerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let driver_name = if args.simulate {
        info!("Simulation mode enabled");
        "simulation"
    } else {
        args.driver.as_str()
    };

    let mut core = TrackerCore::new(config)?;
    if let Some(path) = &args.export {
        core.set_export_path(path.clone());
    }

    let running = core.running_flag();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        running.store(false, Ordering::SeqCst);
    })?;

    core.init(driver_name)?;

    if let Err(e) = core.run() {
        error!("Runtime error: {}", e);
    }

    match core.shutdown()? {
        Some(count) => info!("Exported {} points", count),
        None => info!("No export path configured"),
    }

    info!("Tracker HAL shutdown complete");
    Ok(())
}

fn to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(level: Level, json: bool) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
