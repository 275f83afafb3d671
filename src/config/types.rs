//! Configuration types and defaults for quay.
//!
//! This module defines enums, nested structs and default value functions
//! used by the Config struct.

use serde::{Deserialize, Serialize};

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Single-line human-readable output (default).
    #[default]
    Compact,
    /// Multi-line human-readable output.
    Pretty,
    /// Machine-parseable JSON lines.
    Json,
}

impl LogFormat {
    /// Parse a log format from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A ship calling on the port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipConfig {
    /// Unique ship name, also its requester identity at the berths.
    pub name: String,

    /// Capacity of the ship's warehouse.
    pub capacity: usize,

    /// Containers on board when the run starts.
    #[serde(default)]
    pub containers: usize,
}

impl ShipConfig {
    pub fn new(name: &str, capacity: usize, containers: usize) -> Self {
        Self {
            name: name.to_string(),
            capacity,
            containers,
        }
    }
}

// Default value functions for serde
pub(crate) fn default_berth_count() -> usize {
    2
}
pub(crate) fn default_port_capacity() -> usize {
    100
}
pub(crate) fn default_port_containers() -> usize {
    50
}
pub(crate) fn default_timeout_ms() -> u64 {
    30_000
}
pub(crate) fn default_sea_time_ms() -> u64 {
    1_000
}
pub(crate) fn default_max_load() -> usize {
    20
}
pub(crate) fn default_duration_secs() -> u64 {
    10
}
pub(crate) fn default_log_level() -> String {
    "info".to_string()
}
pub(crate) fn default_ships() -> Vec<ShipConfig> {
    vec![
        ShipConfig::new("Aurora", 30, 10),
        ShipConfig::new("Baltica", 40, 25),
        ShipConfig::new("Corsair", 25, 0),
    ]
}
