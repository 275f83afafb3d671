//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a quay run.
///
/// This struct represents the contents of a `quay.yaml` file.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Port settings
    // =========================================================================
    /// Number of berths at the port.
    #[serde(default = "default_berth_count")]
    pub berth_count: usize,

    /// Capacity of the port warehouse.
    #[serde(default = "default_port_capacity")]
    pub port_capacity: usize,

    /// Containers in the port warehouse when the run starts.
    #[serde(default = "default_port_containers")]
    pub port_containers: usize,

    // =========================================================================
    // Timeout settings
    // =========================================================================
    /// Bounded wait for a free berth, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub berth_timeout_ms: u64,

    /// Bounded wait for each warehouse guard during a transfer, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub lock_timeout_ms: u64,

    // =========================================================================
    // Ship settings
    // =========================================================================
    /// Time a ship spends at sea between port calls, in milliseconds.
    #[serde(default = "default_sea_time_ms")]
    pub sea_time_ms: u64,

    /// Upper bound of containers a ship asks to load in one call.
    #[serde(default = "default_max_load")]
    pub max_load: usize,

    /// Ships calling on the port.
    #[serde(default = "default_ships")]
    pub ships: Vec<ShipConfig>,

    // =========================================================================
    // Run settings
    // =========================================================================
    /// How long ships keep sailing before they are stopped, in seconds.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,

    /// Seed for reproducible ship decisions (ship `i` uses `seed + i`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    // =========================================================================
    // Diagnostics settings
    // =========================================================================
    /// Default tracing filter; `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Tracing output format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Append moor/transfer events to this NDJSON file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_log: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            berth_count: default_berth_count(),
            port_capacity: default_port_capacity(),
            port_containers: default_port_containers(),
            berth_timeout_ms: default_timeout_ms(),
            lock_timeout_ms: default_timeout_ms(),
            sea_time_ms: default_sea_time_ms(),
            max_load: default_max_load(),
            ships: default_ships(),
            duration_secs: default_duration_secs(),
            seed: None,
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            event_log: None,
        }
    }
}
