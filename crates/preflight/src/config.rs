use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_MIN_DISK_GB: f64 = 50.0;
pub const DEFAULT_MIN_MEMORY_GB: f64 = 100.0;
pub const DEFAULT_PYTHON: &str = "python3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub command: String,
    pub label: String,
}

impl CommandSpec {
    pub fn new(command: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            label: label.into(),
        }
    }
}

/// What the training workflow expects from the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Requirements {
    /// Accepted `uname -m` values, compared case-sensitively.
    pub architectures: Vec<String>,
    pub min_disk_gb: f64,
    pub min_memory_gb: f64,
    /// Gate the readiness verdict.
    pub required_commands: Vec<CommandSpec>,
    /// Reported only; the setup script installs them.
    pub optional_commands: Vec<CommandSpec>,
    pub packages: Vec<String>,
    pub python: String,
    /// Filesystem to measure. `None` means the user's home directory.
    pub disk_path: Option<PathBuf>,
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            architectures: vec!["aarch64".to_string(), "arm64".to_string()],
            min_disk_gb: DEFAULT_MIN_DISK_GB,
            min_memory_gb: DEFAULT_MIN_MEMORY_GB,
            required_commands: vec![
                CommandSpec::new("python3", "Python 3"),
                CommandSpec::new("git", "Git"),
            ],
            optional_commands: vec![
                CommandSpec::new("uv", "uv (Python package manager)"),
                CommandSpec::new("cargo", "Rust/Cargo"),
            ],
            packages: ["torch", "numpy", "datasets", "fastapi"]
                .into_iter()
                .map(String::from)
                .collect(),
            python: DEFAULT_PYTHON.to_string(),
            disk_path: None,
        }
    }
}
