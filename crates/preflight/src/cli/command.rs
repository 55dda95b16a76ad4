use crate::checks::host::SystemHost;
use crate::checks::run_checks;
use crate::config::{Requirements, DEFAULT_MIN_DISK_GB, DEFAULT_MIN_MEMORY_GB, DEFAULT_PYTHON};
use crate::console::Console;
use anyhow::{bail, Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

const APP_VERSION: &str = match option_env!("PREFLIGHT_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Exit status when the checker itself could not run.
pub const INTERNAL_ERROR: u8 = 3;

/// Exit status for a failed argument parse. Kept apart from the verdict codes
/// so a mistyped flag never reads as "not ready".
pub fn usage_exit_code(error: &clap::Error) -> u8 {
    match error.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => INTERNAL_ERROR,
    }
}

/// Checks whether this machine is ready for nanochat training on DGX Spark.
///
/// Exit status: 0 ready, 1 ready without GPU, 2 not ready, 3 checker error.
#[derive(Parser, Debug)]
#[command(author, version = APP_VERSION, about, long_about = None)]
pub struct Cli {
    /// Minimum free disk space in GB
    #[arg(long, default_value_t = DEFAULT_MIN_DISK_GB)]
    pub min_disk_gb: f64,

    /// Minimum total system memory in GB
    #[arg(long, default_value_t = DEFAULT_MIN_MEMORY_GB)]
    pub min_memory_gb: f64,

    /// Python interpreter used for the package and GPU checks
    #[arg(long, default_value = DEFAULT_PYTHON)]
    pub python: String,

    /// Filesystem to check for free space (defaults to the home directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Print the report as JSON instead of the styled summary
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Log level (error, warn, info, debug, trace); logs go to stderr
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn requirements(&self) -> Result<Requirements> {
        for (flag, value) in [
            ("--min-disk-gb", self.min_disk_gb),
            ("--min-memory-gb", self.min_memory_gb),
        ] {
            if !value.is_finite() || value < 0.0 {
                bail!("{flag} must be a non-negative number, got {value}");
            }
        }

        Ok(Requirements {
            min_disk_gb: self.min_disk_gb,
            min_memory_gb: self.min_memory_gb,
            python: self.python.clone(),
            disk_path: self.path.clone(),
            ..Requirements::default()
        })
    }

    fn colors_disabled(&self) -> bool {
        self.no_color || self.json
    }

    /// Runs the full check and returns the process exit status.
    pub fn run(&self) -> Result<u8> {
        let requirements = self.requirements()?;

        if self.colors_disabled() {
            Console::disable_colors();
        }
        Console::set_quiet(self.json);

        let host = SystemHost::new();
        let report = run_checks(&host, &requirements);

        if self.json {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{json}");
        }

        Ok(report.exit_code)
    }
}
