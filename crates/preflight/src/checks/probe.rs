use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Unsupported(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("No {0} entry found")]
    MissingField(String),
    #[error("Command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },
    #[error("Driver error: {0}")]
    Driver(String),
}

/// Outcome of a single measurement.
///
/// Keeps "measured and below threshold" apart from "could not measure", so the
/// report can word the two differently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Probe<T> {
    Measured(T),
    Unavailable(String),
}

impl<T> Probe<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Probe::Measured(value) => Some(value),
            Probe::Unavailable(_) => None,
        }
    }

    /// True only for a measured value that satisfies `check`.
    pub fn satisfies(&self, check: impl FnOnce(&T) -> bool) -> bool {
        self.value().is_some_and(check)
    }
}

impl<T> From<Result<T, ProbeError>> for Probe<T> {
    fn from(result: Result<T, ProbeError>) -> Self {
        match result {
            Ok(value) => Probe::Measured(value),
            Err(e) => Probe::Unavailable(e.to_string()),
        }
    }
}
