use super::{
    command::{check_command, CommandCheck},
    packages::{check_package, PackageCheck},
};
use crate::{
    checks::{
        host::HostProbe,
        issue::{IssueReport, IssueType},
    },
    config::{CommandSpec, Requirements},
    console::Console,
};

pub const PACKAGE_INSTALL_HINT: &str = "Run 'uv sync --extra gpu' to install packages";

pub struct SoftwareChecker<'a> {
    host: &'a dyn HostProbe,
    requirements: &'a Requirements,
}

impl<'a> SoftwareChecker<'a> {
    pub fn new(host: &'a dyn HostProbe, requirements: &'a Requirements) -> Self {
        Self { host, requirements }
    }

    fn check_commands(
        &self,
        specs: &[CommandSpec],
        required: bool,
        issues: &mut IssueReport,
    ) -> Vec<CommandCheck> {
        specs
            .iter()
            .map(|spec| {
                let check = check_command(self.host, spec, required);
                if check.installed {
                    match &check.version {
                        Some(version) => {
                            Console::success(&format!("{} is installed ({version})", check.label))
                        }
                        None => Console::success(&format!("{} is installed", check.label)),
                    }
                } else {
                    Console::user_error(&format!("{} is NOT installed", check.label));
                    let issue_type = if required {
                        IssueType::CommandNotInstalled
                    } else {
                        IssueType::OptionalCommandNotInstalled
                    };
                    issues.add_issue(
                        issue_type,
                        format!(
                            "{} is NOT installed ({})",
                            check.label,
                            check.reason.as_deref().unwrap_or("unknown")
                        ),
                    );
                }
                check
            })
            .collect()
    }

    /// Missing entries here gate the readiness verdict.
    pub fn check_required_commands(&self, issues: &mut IssueReport) -> Vec<CommandCheck> {
        self.check_commands(&self.requirements.required_commands, true, issues)
    }

    pub fn check_optional_commands(&self, issues: &mut IssueReport) -> Vec<CommandCheck> {
        self.check_commands(&self.requirements.optional_commands, false, issues)
    }

    pub fn check_packages(&self, issues: &mut IssueReport) -> Vec<PackageCheck> {
        let checks: Vec<_> = self
            .requirements
            .packages
            .iter()
            .map(|name| {
                let check = check_package(self.host, &self.requirements.python, name);
                if check.installed {
                    Console::success(&format!("{name} is installed"));
                } else {
                    Console::user_error(&format!("{name} is NOT installed"));
                    issues.add_issue(
                        IssueType::PackageNotInstalled,
                        format!(
                            "{name} is NOT installed ({})",
                            check.reason.as_deref().unwrap_or("unknown")
                        ),
                    );
                }
                check
            })
            .collect();

        if !super::packages::all_installed(&checks) {
            Console::blank();
            Console::detail(PACKAGE_INSTALL_HINT);
        }
        checks
    }
}
