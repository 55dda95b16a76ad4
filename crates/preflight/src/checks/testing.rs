//! In-memory `HostProbe` for unit tests.

use super::host::{CommandOutput, DriverGpu, HostInfo, HostProbe};
use super::probe::ProbeError;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

pub(crate) const GB: u64 = 1_000_000_000;

#[derive(Clone)]
enum Reply {
    Output(CommandOutput),
    Error(io::ErrorKind),
}

#[derive(Clone)]
pub(crate) struct FakeHost {
    pub(crate) machine: String,
    pub(crate) free_bytes: Option<u64>,
    pub(crate) meminfo: Option<String>,
    pub(crate) driver_gpus: Option<Vec<DriverGpu>>,
    replies: HashMap<String, Reply>,
}

pub(crate) fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        success: true,
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

pub(crate) fn failed(code: i32, stderr: &str) -> CommandOutput {
    CommandOutput {
        success: false,
        code: Some(code),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

impl FakeHost {
    /// A host that passes everything except the GPU-dependent checks, which
    /// have no scripted replies yet.
    pub(crate) fn healthy() -> Self {
        Self {
            machine: "aarch64".to_string(),
            free_bytes: Some(500 * GB),
            meminfo: Some("MemTotal:       134217728 kB\nMemFree:        1000 kB\n".to_string()),
            driver_gpus: Some(vec![]),
            replies: HashMap::new(),
        }
        .with_reply("python3 --version", ok("Python 3.12.3"))
        .with_reply("git --version", ok("git version 2.43.0"))
        .with_reply("uv --version", ok("uv 0.4.18"))
        .with_reply("cargo --version", ok("cargo 1.82.0"))
        .with_reply("python3 -c import torch", ok(""))
        .with_reply("python3 -c import numpy", ok(""))
        .with_reply("python3 -c import datasets", ok(""))
        .with_reply("python3 -c import fastapi", ok(""))
    }

    pub(crate) fn with_reply(mut self, command_line: &str, output: CommandOutput) -> Self {
        self.replies
            .insert(command_line.to_string(), Reply::Output(output));
        self
    }

    pub(crate) fn with_error(mut self, command_line: &str, kind: io::ErrorKind) -> Self {
        self.replies
            .insert(command_line.to_string(), Reply::Error(kind));
        self
    }

    pub(crate) fn without(mut self, command_line: &str) -> Self {
        self.replies.remove(command_line);
        self
    }
}

impl HostProbe for FakeHost {
    fn machine(&self) -> String {
        self.machine.clone()
    }

    fn host_info(&self) -> HostInfo {
        HostInfo {
            os: Some("Linux 24.04 Ubuntu".to_string()),
            kernel: Some("6.8.0".to_string()),
            hostname: Some("spark".to_string()),
        }
    }

    fn home_dir(&self) -> Option<PathBuf> {
        Some(PathBuf::from("/home/spark"))
    }

    fn available_space(&self, _path: &Path) -> Result<u64, ProbeError> {
        self.free_bytes.ok_or_else(|| {
            ProbeError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Permission denied",
            ))
        })
    }

    fn read_meminfo(&self) -> Result<String, ProbeError> {
        self.meminfo.clone().ok_or_else(|| {
            ProbeError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            ))
        })
    }

    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        match self.replies.get(&line) {
            Some(Reply::Output(output)) => Ok(output.clone()),
            Some(Reply::Error(kind)) => Err(io::Error::from(*kind)),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }

    fn driver_gpus(&self) -> Result<Vec<DriverGpu>, ProbeError> {
        self.driver_gpus
            .clone()
            .ok_or_else(|| ProbeError::Driver("could not load NVIDIA management library".into()))
    }
}
