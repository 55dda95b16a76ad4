pub mod hardware;
pub mod host;
pub mod issue;
pub mod probe;
pub mod readiness;
pub mod report;
pub mod software;
#[cfg(test)]
mod testing;

pub use report::{run_checks, CheckReport};
