//! Warehouse storage and its scoped guard.

use super::container::{Container, ContainerId};
use crate::error::{PortError, Result};
use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A fixed-capacity store of containers with its own mutual exclusion.
///
/// The held containers live behind a `parking_lot::Mutex`, which is the source
/// of truth. An atomic mirror of the held count backs [`occupied`](Self::occupied)
/// and [`free`](Self::free) so those snapshots never block; they are advisory
/// and every mutating call re-checks under the guard.
pub struct Warehouse {
    capacity: usize,
    containers: Mutex<Vec<Container>>,
    occupied: AtomicUsize,
}

impl Warehouse {
    /// Create an empty warehouse. The capacity never changes afterwards.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            containers: Mutex::new(Vec::new()),
            occupied: AtomicUsize::new(0),
        }
    }

    /// Create a warehouse stocked with an initial load.
    ///
    /// Fails with `CapacityExceeded` if the load does not fit.
    pub fn with_containers(capacity: usize, containers: Vec<Container>) -> Result<Self> {
        if containers.len() > capacity {
            return Err(PortError::CapacityExceeded(format!(
                "initial load of {} containers exceeds capacity {}",
                containers.len(),
                capacity
            )));
        }
        let occupied = containers.len();
        Ok(Self {
            capacity,
            containers: Mutex::new(containers),
            occupied: AtomicUsize::new(occupied),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the number of held containers.
    pub fn occupied(&self) -> usize {
        self.occupied.load(Ordering::Acquire)
    }

    /// Snapshot of the remaining space.
    pub fn free(&self) -> usize {
        self.capacity.saturating_sub(self.occupied())
    }

    /// Admit the whole batch iff it fits; otherwise leave the store unchanged.
    pub fn try_add(&self, containers: &[Container]) -> bool {
        self.lock().try_add(containers)
    }

    /// Remove exactly `amount` containers iff that many are held.
    pub fn try_take(&self, amount: usize) -> Option<Vec<Container>> {
        self.lock().try_take(amount)
    }

    /// Sorted ids of the held containers.
    pub fn contents(&self) -> Vec<ContainerId> {
        let mut ids: Vec<ContainerId> = self.lock().containers().iter().map(|c| c.id()).collect();
        ids.sort_unstable();
        ids
    }

    /// Acquire the guard, waiting as long as it takes.
    ///
    /// Only single-store operations use this; their critical sections are
    /// bounded by the batch size.
    pub fn lock(&self) -> WarehouseGuard<'_> {
        WarehouseGuard {
            warehouse: self,
            containers: self.containers.lock(),
        }
    }

    /// Acquire the guard, giving up after `timeout`.
    pub fn lock_for(&self, timeout: Duration) -> Option<WarehouseGuard<'_>> {
        self.containers
            .try_lock_for(timeout)
            .map(|containers| WarehouseGuard {
                warehouse: self,
                containers,
            })
    }
}

impl std::fmt::Debug for Warehouse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Warehouse")
            .field("capacity", &self.capacity)
            .field("occupied", &self.occupied())
            .finish_non_exhaustive()
    }
}

/// Scoped access to a locked warehouse.
///
/// The warehouse stays locked for as long as the guard lives.
pub struct WarehouseGuard<'a> {
    warehouse: &'a Warehouse,
    containers: MutexGuard<'a, Vec<Container>>,
}

impl WarehouseGuard<'_> {
    pub fn capacity(&self) -> usize {
        self.warehouse.capacity
    }

    /// Authoritative count of held containers.
    pub fn occupied(&self) -> usize {
        self.containers.len()
    }

    /// Authoritative remaining space.
    pub fn free(&self) -> usize {
        self.warehouse.capacity - self.containers.len()
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Admit the whole batch iff `occupied + batch <= capacity`.
    pub fn try_add(&mut self, containers: &[Container]) -> bool {
        if containers.len() > self.free() {
            tracing::trace!(
                requested = containers.len(),
                free = self.free(),
                "warehouse rejected batch"
            );
            return false;
        }
        self.containers.extend_from_slice(containers);
        self.sync();
        true
    }

    /// Remove the `amount` oldest containers iff that many are held.
    pub fn try_take(&mut self, amount: usize) -> Option<Vec<Container>> {
        if amount > self.containers.len() {
            return None;
        }
        let taken: Vec<Container> = self.containers.drain(..amount).collect();
        self.sync();
        Some(taken)
    }

    fn sync(&self) {
        self.warehouse
            .occupied
            .store(self.containers.len(), Ordering::Release);
    }
}
