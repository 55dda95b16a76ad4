use super::hardware::gpu::nvidia;
use super::probe::ProbeError;
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use sysinfo::System;

pub const DEFAULT_MEMINFO_PATH: &str = "/proc/meminfo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// First non-empty line of stdout, falling back to stderr.
    ///
    /// Several tools (older pythons among them) print their version on stderr.
    pub fn first_line(&self) -> Option<&str> {
        self.stdout
            .lines()
            .chain(self.stderr.lines())
            .map(str::trim)
            .find(|line| !line.is_empty())
    }

    /// How a failed run ended, e.g. "exited with status 1".
    pub fn exit_reason(&self) -> String {
        match self.code {
            Some(code) => format!("exited with status {code}"),
            None => "was terminated by a signal".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostInfo {
    pub os: Option<String>,
    pub kernel: Option<String>,
    pub hostname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverGpu {
    pub name: String,
    pub memory_bytes: u64,
    pub driver_version: String,
}

/// Raw access to the machine being inspected.
///
/// Probes never touch the OS directly; they interpret what this port returns.
/// `SystemHost` is the real implementation.
pub trait HostProbe {
    /// Processor architecture identifier as the kernel reports it (`uname -m`).
    fn machine(&self) -> String;

    fn host_info(&self) -> HostInfo;

    fn home_dir(&self) -> Option<PathBuf>;

    /// Bytes available to an unprivileged user on the filesystem holding `path`.
    fn available_space(&self, path: &Path) -> Result<u64, ProbeError>;

    /// Contents of the memory information pseudo-file.
    fn read_meminfo(&self) -> Result<String, ProbeError>;

    /// Runs `program` with captured output. `NotFound` means it is not on PATH.
    fn run(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput>;

    /// Devices visible to the NVIDIA driver, independent of any Python runtime.
    fn driver_gpus(&self) -> Result<Vec<DriverGpu>, ProbeError>;
}

pub struct SystemHost {
    meminfo_path: PathBuf,
}

impl SystemHost {
    pub fn new() -> Self {
        Self::with_meminfo_path(DEFAULT_MEMINFO_PATH)
    }

    pub fn with_meminfo_path(path: impl Into<PathBuf>) -> Self {
        Self {
            meminfo_path: path.into(),
        }
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostProbe for SystemHost {
    fn machine(&self) -> String {
        System::cpu_arch().unwrap_or_else(|| std::env::consts::ARCH.to_string())
    }

    fn host_info(&self) -> HostInfo {
        HostInfo {
            os: System::long_os_version(),
            kernel: System::kernel_version(),
            hostname: System::host_name(),
        }
    }

    fn home_dir(&self) -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }

    fn available_space(&self, path: &Path) -> Result<u64, ProbeError> {
        statvfs_available(path)
    }

    fn read_meminfo(&self) -> Result<String, ProbeError> {
        Ok(std::fs::read_to_string(&self.meminfo_path)?)
    }

    fn run(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput> {
        debug!("Running {program} {}", args.join(" "));
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn driver_gpus(&self) -> Result<Vec<DriverGpu>, ProbeError> {
        nvidia::list_devices()
    }
}

#[cfg(unix)]
fn statvfs_available(path: &Path) -> Result<u64, ProbeError> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path_c = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| ProbeError::Parse(format!("invalid path {}: {e}", path.display())))?;

    let mut stats: libc::statvfs = unsafe { std::mem::zeroed() };
    if unsafe { libc::statvfs(path_c.as_ptr(), &mut stats) } != 0 {
        return Err(std::io::Error::last_os_error().into());
    }

    // Field widths differ between linux and macos.
    #[allow(clippy::unnecessary_cast, clippy::useless_conversion)]
    let available = u64::from(stats.f_bavail) * (stats.f_frsize as u64);
    Ok(available)
}

#[cfg(not(unix))]
fn statvfs_available(_path: &Path) -> Result<u64, ProbeError> {
    Err(ProbeError::Unsupported(
        "Storage detection not supported on this platform".to_string(),
    ))
}
