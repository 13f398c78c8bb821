//! Command-line argument parsing for the headless web UI driver.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Headless driver command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "nebula-demo", about = "Headless web UI placement demo")]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Global widget scale multiplier.
    #[arg(long)]
    pub widget_scale: Option<f64>,

    /// Panel load timeout in milliseconds.
    #[arg(long)]
    pub load_timeout_ms: Option<u64>,

    /// Number of simulation ticks to run.
    #[arg(long, default_value_t = 600)]
    pub ticks: u64,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(scale) = args.widget_scale {
            self.graphics.widget_scale = scale;
        }
        if let Some(timeout) = args.load_timeout_ms {
            self.ui.load_timeout_ms = Some(timeout);
        }
    }
}
