use crate::checks::host::HostProbe;
use crate::checks::probe::ProbeError;
use log::debug;
use serde::Serialize;
use std::io::ErrorKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageCheck {
    pub name: String,
    pub installed: bool,
    pub reason: Option<String>,
}

/// Dotted Python identifier, e.g. `torch` or `torch.cuda`.
///
/// Names end up inside `python -c`, so anything else is rejected outright.
pub fn is_valid_module_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Imports `name` in a fresh interpreter.
pub fn check_package(host: &dyn HostProbe, python: &str, name: &str) -> PackageCheck {
    let not_installed = |reason: String| PackageCheck {
        name: name.to_string(),
        installed: false,
        reason: Some(reason),
    };

    if !is_valid_module_name(name) {
        return not_installed(format!("{name:?} is not a valid module name"));
    }

    let statement = format!("import {name}");
    let failed = |reason: String| ProbeError::CommandFailed {
        command: format!("{python} -c \"{statement}\""),
        reason,
    };

    match host.run(python, &["-c", &statement]) {
        Ok(output) if output.success => PackageCheck {
            name: name.to_string(),
            installed: true,
            reason: None,
        },
        Ok(output) => {
            debug!("{python} -c {statement:?}: {:?}", output.stderr);
            // Last stderr line carries the ImportError/ModuleNotFoundError.
            let reason = output
                .stderr
                .lines()
                .rev()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .map_or_else(|| output.exit_reason(), String::from);
            not_installed(failed(reason).to_string())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            not_installed(format!("`{python}` not found on PATH"))
        }
        Err(e) => not_installed(failed(e.to_string()).to_string()),
    }
}

pub fn all_installed(checks: &[PackageCheck]) -> bool {
    checks.iter().all(|check| check.installed)
}
