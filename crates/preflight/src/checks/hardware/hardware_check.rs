use super::{
    architecture::{evaluate_architecture, ArchitectureCheck},
    gpu::{check_gpu, GpuCheck, GpuStatus},
    memory::{check_memory, MemoryCheck},
    storage::{check_disk_space, DiskCheck},
};
use crate::{
    checks::{
        host::HostProbe,
        issue::{IssueReport, IssueType},
        probe::Probe,
    },
    config::Requirements,
    console::Console,
};

pub struct HardwareChecker<'a> {
    host: &'a dyn HostProbe,
    requirements: &'a Requirements,
}

impl<'a> HardwareChecker<'a> {
    pub fn new(host: &'a dyn HostProbe, requirements: &'a Requirements) -> Self {
        Self { host, requirements }
    }

    pub fn check_architecture(&self, issues: &mut IssueReport) -> ArchitectureCheck {
        let check = evaluate_architecture(&self.host.machine(), &self.requirements.architectures);

        Console::info("Machine", &check.machine);
        Console::blank();
        if check.matches {
            Console::success(&format!("Correct architecture: {}", check.machine));
        } else {
            Console::warning(&format!(
                "Warning: Expected ARM64 architecture, got {}",
                check.machine
            ));
            Console::detail("This version is optimized for DGX Spark (ARM)");
            issues.add_issue(
                IssueType::ArchitectureMismatch,
                format!("Expected ARM64 architecture, got {}", check.machine),
            );
        }
        check
    }

    pub fn check_disk(&self, issues: &mut IssueReport) -> DiskCheck {
        let min_gb = self.requirements.min_disk_gb;
        let check = check_disk_space(self.host, self.requirements.disk_path.as_deref(), min_gb);

        match &check.free_gb {
            Probe::Measured(free_gb) => {
                let location = match &self.requirements.disk_path {
                    Some(path) => path.display().to_string(),
                    None => "home".to_string(),
                };
                Console::detail(&format!("Free disk space in {location}: {free_gb:.1} GB"));
                if check.sufficient {
                    Console::success("Sufficient disk space available");
                } else {
                    Console::warning(&format!(
                        "Warning: Less than {min_gb:.0} GB free. nanochat needs ~{min_gb:.0} GB"
                    ));
                    issues.add_issue(
                        IssueType::InsufficientStorage,
                        format!("{free_gb:.1} GB free, {min_gb:.0} GB recommended"),
                    );
                }
            }
            Probe::Unavailable(reason) => {
                Console::user_error(&format!("Could not check disk space: {reason}"));
                issues.add_issue(
                    IssueType::InsufficientStorage,
                    format!("Could not check disk space: {reason}"),
                );
            }
        }
        check
    }

    pub fn check_memory(&self, issues: &mut IssueReport) -> MemoryCheck {
        let min_gb = self.requirements.min_memory_gb;
        let check = check_memory(self.host, min_gb);

        match &check.total_gb {
            Probe::Measured(total_gb) => {
                Console::detail(&format!("Total system memory: {total_gb:.1} GB"));
                if check.sufficient {
                    Console::success("Sufficient system memory");
                } else {
                    Console::warning("Warning: DGX Spark should have ~128 GB memory");
                    issues.add_issue(
                        IssueType::InsufficientMemory,
                        format!("{total_gb:.1} GB total, {min_gb:.0} GB expected"),
                    );
                }
            }
            Probe::Unavailable(reason) => {
                Console::user_error(&format!("Could not check memory: {reason}"));
                issues.add_issue(
                    IssueType::InsufficientMemory,
                    format!("Could not check memory: {reason}"),
                );
            }
        }
        check
    }

    pub fn check_gpu(&self, issues: &mut IssueReport) -> GpuCheck {
        let python = &self.requirements.python;
        let check = check_gpu(self.host, python);

        match &check.status {
            GpuStatus::Detected { device } => {
                Console::success(&format!("GPU detected: {}", device.name));
                Console::detail(&format!("Total memory: {:.1} GB", device.memory_gb));
                if device.device_count > 1 {
                    Console::detail(&format!("Devices visible: {}", device.device_count));
                }
            }
            GpuStatus::NoAccelerator { .. } => {
                Console::user_error("No CUDA GPU detected");
                Console::detail("nanochat can run on CPU but will be very slow");
                issues.add_issue(IssueType::NoGpu, "No CUDA GPU detected");
            }
            GpuStatus::RuntimeUnavailable { reason } => {
                Console::user_error("PyTorch not installed, cannot check GPU");
                Console::detail(reason);
                issues.add_issue(
                    IssueType::GpuRuntimeMissing,
                    format!("Cannot check GPU: {reason}"),
                );
            }
            GpuStatus::CheckFailed { reason } => {
                Console::user_error(&format!("Could not run GPU check with {python}"));
                Console::detail(reason);
                issues.add_issue(
                    IssueType::GpuCheckFailed,
                    format!("GPU check failed: {reason}"),
                );
            }
        }

        if let Some(first) = check.driver_devices.first() {
            Console::warning(&format!(
                "NVIDIA driver {} sees {} device(s) ({}) that PyTorch cannot use",
                first.driver_version,
                check.driver_devices.len(),
                first.name
            ));
            if matches!(check.status, GpuStatus::CheckFailed { .. }) {
                Console::detail(&format!("Check that {python} runs and can import torch"));
            } else {
                Console::detail("Install a CUDA-enabled PyTorch build: uv sync --extra gpu");
            }
        }
        check
    }
}
