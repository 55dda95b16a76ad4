use crate::checks::host::HostProbe;
use crate::checks::probe::ProbeError;
use crate::config::CommandSpec;
use log::debug;
use serde::Serialize;
use std::io::ErrorKind;

pub const VERSION_FLAG: &str = "--version";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandCheck {
    pub command: String,
    pub label: String,
    pub required: bool,
    pub installed: bool,
    pub version: Option<String>,
    /// Why the command counts as missing.
    pub reason: Option<String>,
}

/// Runs `<command> --version`. Not on PATH and a non-zero exit both mean
/// "not installed".
pub fn check_command(host: &dyn HostProbe, spec: &CommandSpec, required: bool) -> CommandCheck {
    let failed = |reason: String| ProbeError::CommandFailed {
        command: format!("{} {VERSION_FLAG}", spec.command),
        reason,
    };

    let (installed, version, reason) = match host.run(&spec.command, &[VERSION_FLAG]) {
        Ok(output) if output.success => (true, output.first_line().map(String::from), None),
        Ok(output) => (false, None, Some(failed(output.exit_reason()).to_string())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            (false, None, Some(format!("`{}` not found on PATH", spec.command)))
        }
        Err(e) => (false, None, Some(failed(e.to_string()).to_string())),
    };

    debug!(
        "{} installed={installed} version={version:?} reason={reason:?}",
        spec.command
    );

    CommandCheck {
        command: spec.command.clone(),
        label: spec.label.clone(),
        required,
        installed,
        version,
        reason,
    }
}

pub fn all_installed(checks: &[CommandCheck]) -> bool {
    checks.iter().all(|check| check.installed)
}
