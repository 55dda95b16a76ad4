use crate::checks::host::{DriverGpu, HostProbe};
use log::debug;
use serde::{Deserialize, Serialize};

pub mod nvidia;

pub const BYTES_TO_GB: f64 = 1e9;

/// Asks PyTorch, the runtime training will actually use, about CUDA.
///
/// Always exits 0 and prints one JSON object so that "torch missing" and
/// "no accelerator" can be told apart from the interpreter itself failing.
pub(crate) const GPU_PROBE_SCRIPT: &str = r#"import json
try:
    import torch
except ImportError as e:
    print(json.dumps({"runtime": False, "error": str(e)}))
    raise SystemExit(0)
report = {"runtime": True, "version": torch.__version__, "available": bool(torch.cuda.is_available())}
if report["available"]:
    report["name"] = torch.cuda.get_device_name(0)
    report["total_memory"] = torch.cuda.get_device_properties(0).total_memory
    report["device_count"] = torch.cuda.device_count()
print(json.dumps(report))"#;

#[derive(Debug, Deserialize)]
struct RuntimeReport {
    runtime: bool,
    #[serde(default)]
    available: bool,
    version: Option<String>,
    name: Option<String>,
    total_memory: Option<u64>,
    device_count: Option<u32>,
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpuDevice {
    pub name: String,
    pub memory_gb: f64,
    pub device_count: u32,
    pub runtime_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GpuStatus {
    Detected { device: GpuDevice },
    /// Runtime loads but sees no accelerator; training would run on CPU.
    NoAccelerator { runtime_version: Option<String> },
    /// Runtime could not be loaded, so availability is unknown.
    RuntimeUnavailable { reason: String },
    /// The interpreter itself could not answer: missing, crashed or printed
    /// something unreadable.
    CheckFailed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpuCheck {
    pub status: GpuStatus,
    /// What the NVIDIA driver sees. Only queried when the runtime found
    /// nothing usable, to explain the mismatch.
    pub driver_devices: Vec<DriverGpu>,
}

impl GpuCheck {
    pub fn usable(&self) -> bool {
        matches!(self.status, GpuStatus::Detected { .. })
    }
}

pub fn query_runtime(host: &dyn HostProbe, python: &str) -> GpuStatus {
    let output = match host.run(python, &["-c", GPU_PROBE_SCRIPT]) {
        Ok(output) => output,
        Err(e) => {
            return GpuStatus::CheckFailed {
                reason: format!("could not run {python}: {e}"),
            }
        }
    };

    if !output.success {
        let detail = output.first_line().unwrap_or("no output");
        return GpuStatus::CheckFailed {
            reason: format!("{python} {}: {detail}", output.exit_reason()),
        };
    }

    let Some(json_line) = output.stdout.lines().rev().find(|l| !l.trim().is_empty()) else {
        return GpuStatus::CheckFailed {
            reason: format!("{python} printed nothing"),
        };
    };

    let report: RuntimeReport = match serde_json::from_str(json_line) {
        Ok(report) => report,
        Err(e) => {
            return GpuStatus::CheckFailed {
                reason: format!("unexpected output from {python}: {e}"),
            }
        }
    };
    debug!("GPU runtime report: {report:?}");

    if !report.runtime {
        return GpuStatus::RuntimeUnavailable {
            reason: report
                .error
                .unwrap_or_else(|| "PyTorch not installed".to_string()),
        };
    }

    if !report.available {
        return GpuStatus::NoAccelerator {
            runtime_version: report.version,
        };
    }

    GpuStatus::Detected {
        device: GpuDevice {
            name: report.name.unwrap_or_else(|| "Unknown".to_string()),
            memory_gb: report.total_memory.unwrap_or(0) as f64 / BYTES_TO_GB,
            device_count: report.device_count.unwrap_or(1),
            runtime_version: report.version,
        },
    }
}

pub fn check_gpu(host: &dyn HostProbe, python: &str) -> GpuCheck {
    let status = query_runtime(host, python);

    let driver_devices = if matches!(status, GpuStatus::Detected { .. }) {
        Vec::new()
    } else {
        host.driver_gpus().unwrap_or_else(|e| {
            debug!("NVIDIA driver query failed: {e}");
            Vec::new()
        })
    };

    GpuCheck {
        status,
        driver_devices,
    }
}
