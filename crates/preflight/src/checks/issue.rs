use crate::console::Console;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueType {
    ArchitectureMismatch,        // Build targets ARM hosts
    InsufficientStorage,         // Datasets and checkpoints need room
    InsufficientMemory,          // Expected unified memory size
    CommandNotInstalled,         // Required executable missing
    OptionalCommandNotInstalled, // Setup script installs it
    PackageNotInstalled,         // Installable with uv sync
    NoGpu,                       // Training falls back to CPU
    GpuRuntimeMissing,           // PyTorch cannot be imported
    GpuCheckFailed,              // Interpreter missing or crashed
}

impl IssueType {
    pub const fn severity(&self) -> Severity {
        match self {
            Self::CommandNotInstalled => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    issue_type: IssueType,
    severity: Severity,
    message: String,
}

impl Issue {
    pub fn new(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self {
            issue_type,
            severity: issue_type.severity(),
            message: message.into(),
        }
    }

    pub const fn issue_type(&self) -> IssueType {
        self.issue_type
    }

    pub const fn severity(&self) -> Severity {
        self.severity
    }

    pub fn print(&self) {
        match self.severity() {
            Severity::Error => Console::user_error(&self.to_string()),
            Severity::Warning => Console::warning(&self.to_string()),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.issue_type, self.message)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IssueReport {
    issues: Vec<Issue>,
}

impl IssueReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue_type: IssueType, message: impl Into<String>) {
        self.issues.push(Issue::new(issue_type, message));
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Errors first, then warnings, each group in the order they were filed.
    pub fn ordered(&self) -> impl Iterator<Item = &Issue> {
        let errors = self
            .issues
            .iter()
            .filter(|i| i.severity() == Severity::Error);
        let warnings = self
            .issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning);
        errors.chain(warnings)
    }

    pub fn print_issues(&self) {
        if self.issues.is_empty() {
            Console::success("No issues found");
            return;
        }

        Console::section("System Check Issues");

        for issue in self.ordered() {
            issue.print();
        }
    }
}
