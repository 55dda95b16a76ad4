use log::LevelFilter;
use tracing_subscriber::filter::EnvFilter as TracingEnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::cli::Cli;
use std::time::{SystemTime, UNIX_EPOCH};
use time::macros::format_description;
use tracing_subscriber::fmt::time::FormatTime;

struct SimpleTimeFormatter;

impl FormatTime for SimpleTimeFormatter {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = SystemTime::now();
        let timestamp = now.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();

        let datetime = time::OffsetDateTime::from_unix_timestamp(timestamp as i64)
            .unwrap_or(time::OffsetDateTime::UNIX_EPOCH);

        let format = format_description!("[hour]:[minute]:[second]");
        let formatted = datetime
            .format(format)
            .unwrap_or_else(|_| String::from("??:??:??"));

        write!(w, "{formatted}")
    }
}

/// Diagnostics go to stderr; stdout is reserved for the report.
pub fn setup_logging(cli: Option<&Cli>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut log_level = LevelFilter::Warn;
    let mut ansi = console::colors_enabled_stderr();

    if let Some(cli) = cli {
        if let Some(level) = &cli.log_level {
            log_level = level
                .parse()
                .map_err(|_| format!("invalid log level: {level}"))?;
        }
        ansi &= !cli.no_color;
    }

    let env_filter = TracingEnvFilter::from_default_env()
        .add_directive(format!("{log_level}").parse()?)
        .add_directive("nvml_wrapper=warn".parse()?);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(ansi)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_timer(SimpleTimeFormatter)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
