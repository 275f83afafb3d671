//! The port: one shared warehouse behind a pool of berths.

use super::pool::BerthPool;
use crate::config::Config;
use crate::error::Result;
use crate::warehouse::{Container, Warehouse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Requester identity used when a ship asks for a berth.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipId(String);

impl ShipId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A port owns its warehouse and the berths bound to it.
///
/// Ports are constructed explicitly and shared by reference with every ship
/// that calls on them.
#[derive(Debug)]
pub struct Port {
    warehouse: Arc<Warehouse>,
    berths: BerthPool<ShipId>,
}

impl Port {
    /// Create a port with an empty warehouse and default timeouts.
    pub fn new(berth_count: usize, warehouse_capacity: usize) -> Result<Self> {
        let warehouse = Arc::new(Warehouse::new(warehouse_capacity));
        let berths = BerthPool::new(berth_count, Arc::clone(&warehouse))?;
        Ok(Self { warehouse, berths })
    }

    /// Create a port around an existing warehouse.
    pub fn with_warehouse(
        berth_count: usize,
        warehouse: Arc<Warehouse>,
        acquire_timeout: Duration,
        lock_timeout: Duration,
    ) -> Result<Self> {
        let berths = BerthPool::with_timeouts(
            berth_count,
            Arc::clone(&warehouse),
            acquire_timeout,
            lock_timeout,
        )?;
        Ok(Self { warehouse, berths })
    }

    /// Build a port from configuration, stocking its warehouse with `containers`.
    pub fn from_config(config: &Config, containers: Vec<Container>) -> Result<Self> {
        let warehouse = Arc::new(Warehouse::with_containers(
            config.port_capacity,
            containers,
        )?);
        let port = Self::with_warehouse(
            config.berth_count,
            warehouse,
            config.berth_timeout(),
            config.lock_timeout(),
        )?;
        tracing::debug!(
            berths = config.berth_count,
            capacity = config.port_capacity,
            containers = port.warehouse.occupied(),
            "port created"
        );
        Ok(port)
    }

    pub fn warehouse(&self) -> &Arc<Warehouse> {
        &self.warehouse
    }

    pub fn berths(&self) -> &BerthPool<ShipId> {
        &self.berths
    }
}
