use super::{
    hardware::{
        architecture::ArchitectureCheck, gpu::GpuCheck, memory::MemoryCheck, storage::DiskCheck,
        HardwareChecker,
    },
    host::{HostInfo, HostProbe},
    issue::IssueReport,
    readiness::Readiness,
    software::{command::CommandCheck, packages::PackageCheck, SoftwareChecker},
};
use crate::{config::Requirements, console::Console};
use log::info;
use serde::Serialize;

pub const REPORT_TITLE: &str = "DGX Spark Environment Validation";

/// Everything one run measured. Nothing here outlives the process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub host: HostInfo,
    pub python_version: Option<String>,
    pub architecture: ArchitectureCheck,
    pub disk: DiskCheck,
    pub memory: MemoryCheck,
    pub required_commands: Vec<CommandCheck>,
    pub optional_commands: Vec<CommandCheck>,
    pub packages: Vec<PackageCheck>,
    pub gpu: GpuCheck,
    pub required_commands_ok: bool,
    pub packages_ok: bool,
    pub gpu_ok: bool,
    pub readiness: Readiness,
    pub exit_code: u8,
    pub issues: IssueReport,
}

fn python_version(host: &dyn HostProbe, python: &str) -> Option<String> {
    host.run(python, &["--version"])
        .ok()
        .filter(|output| output.success)
        .and_then(|output| output.first_line().map(String::from))
}

fn platform_line(host: &HostInfo) -> String {
    match (&host.os, &host.kernel) {
        (Some(os), Some(kernel)) => format!("{os} (kernel {kernel})"),
        (Some(os), None) => os.clone(),
        (None, Some(kernel)) => format!("kernel {kernel}"),
        (None, None) => "Unknown".to_string(),
    }
}

/// Runs every probe in a fixed order and prints the report as it goes.
///
/// No probe is skipped because of an earlier result.
pub fn run_checks(host: &dyn HostProbe, requirements: &Requirements) -> CheckReport {
    let hardware = HardwareChecker::new(host, requirements);
    let software = SoftwareChecker::new(host, requirements);
    let mut issues = IssueReport::new();

    Console::section(REPORT_TITLE);
    let host_info = host.host_info();
    let python_version = python_version(host, &requirements.python);
    Console::blank();
    Console::info(
        "Python version",
        python_version.as_deref().unwrap_or("Unknown"),
    );
    Console::info("Platform", &platform_line(&host_info));
    let architecture = hardware.check_architecture(&mut issues);

    Console::section("System Requirements");
    let disk = hardware.check_disk(&mut issues);
    let memory = hardware.check_memory(&mut issues);

    Console::section("Required Commands");
    let required_commands = software.check_required_commands(&mut issues);

    Console::section("Optional Commands (will be installed by script)");
    let optional_commands = software.check_optional_commands(&mut issues);

    Console::section("Python Packages");
    let packages = software.check_packages(&mut issues);

    Console::section("GPU Check");
    let gpu = hardware.check_gpu(&mut issues);

    let required_commands_ok = super::software::command::all_installed(&required_commands);
    let packages_ok = super::software::packages::all_installed(&packages);
    let gpu_ok = gpu.usable();
    let readiness = Readiness::from_checks(required_commands_ok, gpu_ok);
    info!(
        "required_commands_ok={required_commands_ok} packages_ok={packages_ok} gpu_ok={gpu_ok} readiness={readiness:?}"
    );

    issues.print_issues();

    Console::section("Summary");
    readiness.print();
    Console::blank();

    CheckReport {
        host: host_info,
        python_version,
        architecture,
        disk,
        memory,
        required_commands,
        optional_commands,
        packages,
        gpu,
        required_commands_ok,
        packages_ok,
        gpu_ok,
        readiness,
        exit_code: readiness.exit_code(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::hardware::gpu::GPU_PROBE_SCRIPT;
    use crate::checks::testing::{ok, FakeHost};

    fn with_gpu(host: FakeHost) -> FakeHost {
        host.with_reply(
            &format!("python3 -c {GPU_PROBE_SCRIPT}"),
            ok(r#"{"runtime": true, "available": true, "name": "NVIDIA GB10", "total_memory": 119000000000, "device_count": 1}"#),
        )
    }

    #[test]
    fn test_healthy_host_with_gpu_is_ready() {
        let host = with_gpu(FakeHost::healthy());
        let report = run_checks(&host, &Requirements::default());

        assert!(report.required_commands_ok);
        assert!(report.packages_ok);
        assert!(report.gpu_ok);
        assert_eq!(report.readiness, Readiness::Ready);
        assert_eq!(report.exit_code, 0);
        assert_eq!(report.python_version.as_deref(), Some("Python 3.12.3"));
        assert!(report.issues.issues().is_empty());
    }

    #[test]
    fn test_no_gpu_is_degraded() {
        let host = FakeHost::healthy();
        let report = run_checks(&host, &Requirements::default());
        assert_eq!(report.readiness, Readiness::ReadyWithoutGpu);
        assert_eq!(report.exit_code, 1);
    }

    #[test]
    fn test_missing_required_command_is_not_ready_even_with_gpu() {
        let host = with_gpu(FakeHost::healthy()).without("git --version");
        let report = run_checks(&host, &Requirements::default());
        assert!(!report.required_commands_ok);
        assert!(report.gpu_ok);
        assert_eq!(report.readiness, Readiness::NotReady);
        assert_eq!(report.exit_code, 2);
    }

    #[test]
    fn test_missing_optional_command_does_not_gate() {
        let host = with_gpu(FakeHost::healthy())
            .without("uv --version")
            .without("cargo --version");
        let report = run_checks(&host, &Requirements::default());
        assert_eq!(report.readiness, Readiness::Ready);
        assert_eq!(report.optional_commands.iter().filter(|c| !c.installed).count(), 2);
    }

    #[test]
    fn test_missing_packages_do_not_gate() {
        let host = with_gpu(FakeHost::healthy()).without("python3 -c import datasets");
        let report = run_checks(&host, &Requirements::default());
        assert!(!report.packages_ok);
        assert_eq!(report.readiness, Readiness::Ready);
    }

    #[test]
    fn test_failing_host_still_produces_full_report() {
        let mut host = FakeHost::healthy()
            .without("python3 --version")
            .without("git --version");
        host.machine = "x86_64".to_string();
        host.free_bytes = None;
        host.meminfo = None;
        host.driver_gpus = None;

        let report = run_checks(&host, &Requirements::default());
        assert!(!report.architecture.matches);
        assert!(!report.disk.sufficient);
        assert!(!report.memory.sufficient);
        assert_eq!(report.required_commands.len(), 2);
        assert_eq!(report.optional_commands.len(), 2);
        assert_eq!(report.packages.len(), 4);
        assert_eq!(report.python_version, None);
        assert_eq!(report.readiness, Readiness::NotReady);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let host = with_gpu(FakeHost::healthy()).without("cargo --version");
        let requirements = Requirements::default();
        let first = run_checks(&host, &requirements);
        let second = run_checks(&host, &requirements);
        assert_eq!(first, second);
    }

    #[test]
    fn test_report_serializes_verdict() {
        let host = FakeHost::healthy();
        let report = run_checks(&host, &Requirements::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["readiness"], "ready_without_gpu");
        assert_eq!(json["exit_code"], 1);
        assert_eq!(json["disk"]["free_gb"]["status"], "measured");
        assert_eq!(json["gpu"]["status"]["status"], "check_failed");
    }
}
