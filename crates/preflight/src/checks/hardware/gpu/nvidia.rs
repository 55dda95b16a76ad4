use crate::checks::host::DriverGpu;
use crate::checks::probe::ProbeError;
use log::debug;
use nvml_wrapper::Nvml;

const NVML_LIB_PATHS: [&str; 4] = [
    "libnvidia-ml.so.1",
    "/usr/lib/aarch64-linux-gnu/libnvidia-ml.so.1",
    "/usr/lib/x86_64-linux-gnu/libnvidia-ml.so.1",
    "/usr/lib/libnvidia-ml.so.1",
];

fn init_nvml() -> Result<Nvml, ProbeError> {
    let mut last_error = None;
    for path in NVML_LIB_PATHS {
        match Nvml::builder().lib_path(std::ffi::OsStr::new(path)).init() {
            Ok(nvml) => return Ok(nvml),
            Err(e) => {
                debug!("NVML not loadable from {path}: {e}");
                last_error = Some(e);
            }
        }
    }
    Err(ProbeError::Driver(match last_error {
        Some(e) => format!("could not load NVIDIA management library: {e}"),
        None => "could not load NVIDIA management library".to_string(),
    }))
}

/// Lists every device the NVIDIA driver exposes, in index order.
pub(crate) fn list_devices() -> Result<Vec<DriverGpu>, ProbeError> {
    let nvml = init_nvml()?;

    let device_count = nvml
        .device_count()
        .map_err(|e| ProbeError::Driver(format!("Failed to get device count: {e}")))?;

    let driver_version = nvml
        .sys_driver_version()
        .unwrap_or_else(|_| "Unknown".to_string());

    let mut devices = Vec::with_capacity(device_count as usize);
    for i in 0..device_count {
        match nvml.device_by_index(i) {
            Ok(device) => {
                let name = device.name().unwrap_or_else(|_| "Unknown".to_string());
                // Unified-memory parts report no dedicated framebuffer.
                let memory_bytes = device.memory_info().map(|m| m.total).unwrap_or(0);
                devices.push(DriverGpu {
                    name,
                    memory_bytes,
                    driver_version: driver_version.clone(),
                });
            }
            Err(e) => debug!("Failed to get device {i}: {e}"),
        }
    }

    Ok(devices)
}
