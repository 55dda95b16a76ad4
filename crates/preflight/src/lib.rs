pub mod checks;
mod cli;
pub mod config;
mod console;
mod utils;

pub use checks::{run_checks, CheckReport};
pub use cli::{usage_exit_code, Cli, INTERNAL_ERROR};
pub use utils::setup_logging;
