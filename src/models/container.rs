//! Container domain models shared by the runtime and the service layer.

/// A container as seen in a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerSummary {
    pub id: String,
    pub names: Vec<String>,
    pub image: String,
    pub state: String,
    pub status: String,
    pub created: i64,
}

impl From<bollard::models::ContainerSummary> for ContainerSummary {
    fn from(c: bollard::models::ContainerSummary) -> Self {
        Self {
            id: c.id.unwrap_or_default(),
            names: c.names.unwrap_or_default(),
            image: c.image.unwrap_or_default(),
            state: c.state.map(|s| s.to_string()).unwrap_or_default(),
            status: c.status.unwrap_or_default(),
            created: c.created.unwrap_or_default(),
        }
    }
}

/// Raw counters from a single stats sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawStats {
    pub cpu_total_usage: u64,
    pub precpu_total_usage: u64,
    pub system_cpu_usage: u64,
    pub presystem_cpu_usage: u64,
    pub memory_usage: u64,
    pub memory_limit: u64,
}

/// CPU and memory figures of a container, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerStats {
    /// CPU usage since the previous sample, in percent
    pub cpu_percent: f64,
    /// Memory in use, formatted in MiB
    pub memory_usage: String,
    /// Memory limit, formatted in MiB
    pub memory_limit: String,
    /// Memory in use relative to the limit, in percent
    pub memory_percent: f64,
}

const MIB: f64 = 1024.0 * 1024.0;

impl From<RawStats> for ContainerStats {
    fn from(raw: RawStats) -> Self {
        let cpu_delta = raw.cpu_total_usage.saturating_sub(raw.precpu_total_usage) as f64;
        let system_delta = raw.system_cpu_usage.saturating_sub(raw.presystem_cpu_usage) as f64;
        let cpu_percent = if system_delta > 0.0 {
            (cpu_delta / system_delta) * 100.0
        } else {
            0.0
        };

        let usage = raw.memory_usage as f64;
        let limit = raw.memory_limit as f64;
        let memory_percent = if limit > 0.0 {
            usage / limit * 100.0
        } else {
            0.0
        };

        Self {
            cpu_percent,
            memory_usage: format!("{:.2} MiB", usage / MIB),
            memory_limit: format!("{:.2} MiB", limit / MIB),
            memory_percent,
        }
    }
}
