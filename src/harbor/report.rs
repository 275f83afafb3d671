//! End-of-run summary.

use crate::ship::ShipStats;
use crate::warehouse::Warehouse;
use serde::{Deserialize, Serialize};

/// Capacity and fill of one warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseReport {
    pub capacity: usize,
    pub occupied: usize,
}

impl From<&Warehouse> for WarehouseReport {
    fn from(warehouse: &Warehouse) -> Self {
        Self {
            capacity: warehouse.capacity(),
            occupied: warehouse.occupied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipReport {
    pub name: String,
    pub warehouse: WarehouseReport,
    pub stats: ShipStats,
}

/// What happened during one harbor run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarborReport {
    pub elapsed_ms: u64,
    pub berths: usize,
    pub total_containers: usize,
    pub port: WarehouseReport,
    pub ships: Vec<ShipReport>,
}

impl std::fmt::Display for HarborReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Harbor run finished after {:.1}s ({} berths, {} containers accounted for)",
            self.elapsed_ms as f64 / 1000.0,
            self.berths,
            self.total_containers
        )?;
        writeln!(
            f,
            "  Port warehouse: {}/{}",
            self.port.occupied, self.port.capacity
        )?;
        for ship in &self.ships {
            writeln!(
                f,
                "  {}: {}/{} on board, {} calls ({} refused), {} unloads ({} containers, {} refused), {} loads ({} containers, {} refused)",
                ship.name,
                ship.warehouse.occupied,
                ship.warehouse.capacity,
                ship.stats.port_calls,
                ship.stats.moorings_refused,
                ship.stats.unloads,
                ship.stats.containers_unloaded,
                ship.stats.unloads_refused,
                ship.stats.loads,
                ship.stats.containers_loaded,
                ship.stats.loads_refused
            )?;
        }
        Ok(())
    }
}
