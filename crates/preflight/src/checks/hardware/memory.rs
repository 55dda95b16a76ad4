use crate::checks::host::HostProbe;
use crate::checks::probe::{Probe, ProbeError};
use log::debug;
use serde::Serialize;

/// meminfo reports kibibytes; the report divides by 1e6 to get gigabytes.
pub const KB_TO_GB: f64 = 1e6;

const MEM_TOTAL_LABEL: &str = "MemTotal";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryCheck {
    pub total_gb: Probe<f64>,
    pub min_gb: f64,
    pub sufficient: bool,
}

/// Value of the first `MemTotal` line, in kB.
pub fn parse_mem_total_kb(meminfo: &str) -> Result<u64, ProbeError> {
    let line = meminfo
        .lines()
        .find(|line| line.contains(MEM_TOTAL_LABEL))
        .ok_or_else(|| ProbeError::MissingField(MEM_TOTAL_LABEL.to_string()))?;

    let value = line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| ProbeError::Parse(format!("no value in line {line:?}")))?;

    value
        .parse::<u64>()
        .map_err(|e| ProbeError::Parse(format!("{value:?}: {e}")))
}

pub fn has_enough_memory(total_gb: f64, min_gb: f64) -> bool {
    total_gb >= min_gb
}

fn measure_total_gb(host: &dyn HostProbe) -> Result<f64, ProbeError> {
    let meminfo = host.read_meminfo()?;
    let total_kb = parse_mem_total_kb(&meminfo)?;
    debug!("{MEM_TOTAL_LABEL}: {total_kb} kB");
    Ok(total_kb as f64 / KB_TO_GB)
}

pub fn check_memory(host: &dyn HostProbe, min_gb: f64) -> MemoryCheck {
    let total_gb: Probe<f64> = measure_total_gb(host).into();
    MemoryCheck {
        sufficient: total_gb.satisfies(|total| has_enough_memory(*total, min_gb)),
        total_gb,
        min_gb,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::FakeHost;
    use std::io::Write;

    fn host_with(meminfo: Option<&str>) -> FakeHost {
        let mut host = FakeHost::healthy();
        host.meminfo = meminfo.map(String::from);
        host
    }

    #[test]
    fn test_parse_mem_total() {
        let meminfo = "MemTotal:       131072000 kB\nMemFree:         2048 kB\n";
        assert_eq!(parse_mem_total_kb(meminfo).unwrap(), 131_072_000);
    }

    #[test]
    fn test_128_gib_is_enough() {
        let check = check_memory(&host_with(Some("MemTotal: 134217728 kB\n")), 100.0);
        assert!(check.sufficient);
        let total = *check.total_gb.value().unwrap();
        assert!((total - 134.217728).abs() < 1e-9);
    }

    #[test]
    fn test_100_gib_passes_decimal_threshold() {
        // 100 GiB in kB is ~104.86 decimal GB, which clears the 100 GB bar.
        let check = check_memory(&host_with(Some("MemTotal: 104857600 kB\n")), 100.0);
        assert!(check.sufficient);
    }

    #[test]
    fn test_64_gib_is_not_enough() {
        let check = check_memory(&host_with(Some("MemTotal: 67108864 kB\n")), 100.0);
        assert!(!check.sufficient);
        assert!(check.total_gb.value().is_some());
    }

    #[test]
    fn test_threshold_boundary() {
        assert!(check_memory(&host_with(Some("MemTotal: 100000000 kB")), 100.0).sufficient);
        assert!(!check_memory(&host_with(Some("MemTotal: 99999999 kB")), 100.0).sufficient);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let check = check_memory(&host_with(None), 100.0);
        assert!(!check.sufficient);
        assert!(matches!(check.total_gb, Probe::Unavailable(_)));
    }

    #[test]
    fn test_missing_mem_total_line_is_unavailable() {
        let check = check_memory(&host_with(Some("MemFree: 1 kB\n")), 100.0);
        assert_eq!(
            check.total_gb,
            Probe::Unavailable("No MemTotal entry found".to_string())
        );
    }

    #[test]
    fn test_garbled_value_is_unavailable() {
        let check = check_memory(&host_with(Some("MemTotal: lots kB\n")), 100.0);
        assert!(matches!(&check.total_gb, Probe::Unavailable(reason) if reason.contains("lots")));
    }

    #[test]
    fn test_reads_meminfo_file_from_disk() {
        use crate::checks::host::SystemHost;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "MemTotal:       134217728 kB").unwrap();
        writeln!(file, "MemAvailable:   120000000 kB").unwrap();

        let host = SystemHost::with_meminfo_path(file.path());
        let check = check_memory(&host, 100.0);
        assert!(check.sufficient);
    }
}
