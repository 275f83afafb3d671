//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{PortError, Result};
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the quay.yaml file
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(PortError::Io)` - The file could not be read
    /// * `Err(PortError::Config)` - Parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PortError::Io(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| PortError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| PortError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `berth_count`, both timeouts and `max_load` must be positive
    /// - the port and every ship must fit their initial containers
    /// - ship names must be non-empty and unique
    pub fn validate(&self) -> Result<()> {
        if self.berth_count == 0 {
            return Err(invalid("berth_count must be greater than 0"));
        }
        if self.berth_timeout_ms == 0 {
            return Err(invalid("berth_timeout_ms must be greater than 0"));
        }
        if self.lock_timeout_ms == 0 {
            return Err(invalid("lock_timeout_ms must be greater than 0"));
        }
        if self.max_load == 0 {
            return Err(invalid("max_load must be greater than 0"));
        }
        if self.port_containers > self.port_capacity {
            return Err(invalid(&format!(
                "port_containers ({}) exceeds port_capacity ({})",
                self.port_containers, self.port_capacity
            )));
        }

        let mut names = BTreeSet::new();
        for ship in &self.ships {
            if ship.name.trim().is_empty() {
                return Err(invalid("ship names must be non-empty"));
            }
            if !names.insert(ship.name.as_str()) {
                return Err(invalid(&format!("duplicate ship name '{}'", ship.name)));
            }
            if ship.containers > ship.capacity {
                return Err(invalid(&format!(
                    "ship '{}' carries {} containers but its capacity is {}",
                    ship.name, ship.containers, ship.capacity
                )));
            }
        }

        Ok(())
    }

    pub fn berth_timeout(&self) -> Duration {
        Duration::from_millis(self.berth_timeout_ms)
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }

    pub fn sea_time(&self) -> Duration {
        Duration::from_millis(self.sea_time_ms)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    /// Total containers in the port and on every ship at the start of a run.
    pub fn total_containers(&self) -> usize {
        self.port_containers + self.ships.iter().map(|s| s.containers).sum::<usize>()
    }
}

fn invalid(reason: &str) -> PortError {
    PortError::Config(format!("config validation failed: {}", reason))
}
