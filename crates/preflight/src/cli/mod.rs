mod command;
pub use command::{usage_exit_code, Cli, INTERNAL_ERROR};
