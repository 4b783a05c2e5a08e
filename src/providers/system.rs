use super::{SystemProvider, SystemSnapshot};

/// Reads load and memory from `/proc`. Other platforms report nothing.
pub struct ProcSystem;

impl SystemProvider for ProcSystem {
    fn snapshot(&self) -> Option<SystemSnapshot> {
        if !cfg!(target_os = "linux") {
            return None;
        }

        let loadavg = std::fs::read_to_string("/proc/loadavg").ok()?;
        let meminfo = std::fs::read_to_string("/proc/meminfo").ok()?;
        let load_1m = parse_loadavg(&loadavg)?;
        let (total, available) = parse_meminfo(&meminfo)?;
        let cpu_count = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Some(SystemSnapshot {
            load_1m,
            cpu_count,
            memory_used_bytes: total.saturating_sub(available),
            memory_total_bytes: total,
        })
    }
}

/// First field of `/proc/loadavg`.
pub fn parse_loadavg(contents: &str) -> Option<f64> {
    contents.split_whitespace().next()?.parse().ok()
}

/// `(MemTotal, MemAvailable)` in bytes from `/proc/meminfo`.
pub fn parse_meminfo(contents: &str) -> Option<(u64, u64)> {
    let mut total = None;
    let mut available = None;

    for line in contents.lines() {
        let mut parts = line.split_whitespace();
        let key = parts.next();
        let kib = parts.next().and_then(|v| v.parse::<u64>().ok());
        match (key, kib) {
            (Some("MemTotal:"), Some(v)) => total = Some(v * 1024),
            (Some("MemAvailable:"), Some(v)) => available = Some(v * 1024),
            _ => {}
        }
    }

    Some((total?, available?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loadavg() {
        assert_eq!(parse_loadavg("0.52 0.48 0.40 1/234 5678\n"), Some(0.52));
        assert_eq!(parse_loadavg(""), None);
    }

    #[test]
    fn test_parse_meminfo() {
        let sample = "MemTotal:       16000000 kB\nMemFree:         1000000 kB\nMemAvailable:    8000000 kB\n";
        assert_eq!(
            parse_meminfo(sample),
            Some((16_000_000 * 1024, 8_000_000 * 1024))
        );
    }

    #[test]
    fn test_parse_meminfo_missing_available() {
        assert_eq!(parse_meminfo("MemTotal: 100 kB\n"), None);
    }
}
