use crate::checks::host::HostProbe;
use crate::checks::probe::{Probe, ProbeError};
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Decimal gigabytes, matching what disk vendors and `df -H` report.
pub const BYTES_TO_GB: f64 = 1e9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskCheck {
    pub path: Option<PathBuf>,
    pub free_gb: Probe<f64>,
    pub min_gb: f64,
    pub sufficient: bool,
}

pub fn has_enough_space(free_gb: f64, min_gb: f64) -> bool {
    free_gb >= min_gb
}

fn measure_free_gb(host: &dyn HostProbe, path: &Path) -> Result<f64, ProbeError> {
    let available = host.available_space(path)?;
    debug!("statvfs({}) reports {available} bytes available", path.display());
    Ok(available as f64 / BYTES_TO_GB)
}

/// Free space on the filesystem holding `path`, or the home directory when
/// no path is given.
pub fn check_disk_space(host: &dyn HostProbe, path: Option<&Path>, min_gb: f64) -> DiskCheck {
    let path = path.map(Path::to_path_buf).or_else(|| host.home_dir());

    let free_gb: Probe<f64> = match &path {
        Some(path) => measure_free_gb(host, path).into(),
        None => Probe::Unavailable("could not determine home directory".to_string()),
    };

    DiskCheck {
        sufficient: free_gb.satisfies(|free| has_enough_space(*free, min_gb)),
        path,
        free_gb,
        min_gb,
    }
}
