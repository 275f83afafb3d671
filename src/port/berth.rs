//! Berths and the dual-warehouse transfer protocol.

use crate::error::{PortError, Result};
use crate::warehouse::{Warehouse, WarehouseGuard};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Default bounded wait for a warehouse guard during a transfer.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(30);

/// Stable identity of a berth, used for equality and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BerthId(pub u32);

impl std::fmt::Display for BerthId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "berth #{}", self.0)
    }
}

/// Direction of a transfer relative to the berth's home warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Counterpart -> home.
    Push,
    /// Home -> counterpart.
    Pull,
}

/// An exclusive access point to the port warehouse.
///
/// A berth is bound to its home warehouse for its whole lifetime. Berths are
/// compared by [`BerthId`] only; the warehouse guard has no meaningful
/// equality and is never part of a comparison.
pub struct Berth {
    id: BerthId,
    warehouse: Arc<Warehouse>,
    lock_timeout: Duration,
}

impl Berth {
    pub fn new(id: BerthId, warehouse: Arc<Warehouse>, lock_timeout: Duration) -> Self {
        Self {
            id,
            warehouse,
            lock_timeout,
        }
    }

    pub fn id(&self) -> BerthId {
        self.id
    }

    /// The warehouse this berth gives access to.
    pub fn warehouse(&self) -> &Arc<Warehouse> {
        &self.warehouse
    }

    pub fn lock_timeout(&self) -> Duration {
        self.lock_timeout
    }

    /// Move `amount` containers from `counterpart` into the home warehouse.
    ///
    /// Returns `true` iff the move completed. See [`try_push`](Self::try_push).
    pub fn push(&self, counterpart: &Warehouse, amount: usize) -> bool {
        self.settle(self.try_push(counterpart, amount))
    }

    /// Move `amount` containers from the home warehouse into `counterpart`.
    ///
    /// Returns `true` iff the move completed. See [`try_pull`](Self::try_pull).
    pub fn pull(&self, counterpart: &Warehouse, amount: usize) -> bool {
        self.settle(self.try_pull(counterpart, amount))
    }

    /// Move `amount` containers from `counterpart` into the home warehouse.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - All containers moved
    /// * `Err(PortError::Timeout)` - A warehouse guard was not acquired in time
    /// * `Err(PortError::CapacityExceeded)` - Not enough room at home or not enough
    ///   containers in `counterpart`, checked under both guards
    /// * `Err(PortError::SameWarehouse)` - `counterpart` is the home warehouse
    /// * `Err(PortError::ConsistencyViolation)` - A guarded move misbehaved
    pub fn try_push(&self, counterpart: &Warehouse, amount: usize) -> Result<()> {
        self.transfer(counterpart, amount, Direction::Push)
    }

    /// Move `amount` containers from the home warehouse into `counterpart`.
    ///
    /// Same protocol and failure kinds as [`try_push`](Self::try_push), mirrored.
    pub fn try_pull(&self, counterpart: &Warehouse, amount: usize) -> Result<()> {
        self.transfer(counterpart, amount, Direction::Pull)
    }

    /// Ordered dual-lock transfer.
    ///
    /// The home guard is always taken first and the counterpart guard second,
    /// whatever the direction. Guards are released in reverse order when they
    /// drop, on every exit path.
    fn transfer(&self, counterpart: &Warehouse, amount: usize, direction: Direction) -> Result<()> {
        if std::ptr::eq(Arc::as_ptr(&self.warehouse), counterpart) {
            return Err(PortError::SameWarehouse);
        }

        let mut home = self.warehouse.lock_for(self.lock_timeout).ok_or_else(|| {
            PortError::Timeout(format!("port warehouse guard at {}", self.id))
        })?;

        match direction {
            Direction::Push if amount > home.free() => {
                return Err(PortError::CapacityExceeded(format!(
                    "port warehouse has room for {} containers, {} requested",
                    home.free(),
                    amount
                )));
            }
            Direction::Pull if amount > home.occupied() => {
                return Err(PortError::CapacityExceeded(format!(
                    "port warehouse holds {} containers, {} requested",
                    home.occupied(),
                    amount
                )));
            }
            _ => {}
        }

        let mut other = counterpart.lock_for(self.lock_timeout).ok_or_else(|| {
            PortError::Timeout(format!("counterpart warehouse guard at {}", self.id))
        })?;

        match direction {
            Direction::Push => move_containers(&mut other, &mut home, amount)?,
            Direction::Pull => move_containers(&mut home, &mut other, amount)?,
        }

        tracing::debug!(berth = self.id.0, ?direction, amount, "transfer completed");
        Ok(())
    }

    fn settle(&self, result: Result<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(PortError::ConsistencyViolation(reason)) => {
                tracing::error!(berth = self.id.0, %reason, "transfer broke a port invariant");
                false
            }
            Err(err) => {
                tracing::debug!(berth = self.id.0, error = %err, "transfer refused");
                false
            }
        }
    }
}

impl std::fmt::Debug for Berth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Berth")
            .field("id", &self.id)
            .field("lock_timeout", &self.lock_timeout)
            .finish_non_exhaustive()
    }
}

/// Move `amount` containers between two already-locked warehouses.
///
/// Both counts are re-validated here, with both guards held, before anything
/// moves. If the destination rejects the batch anyway the containers go back
/// to the source before the guards are released.
fn move_containers(
    source: &mut WarehouseGuard<'_>,
    destination: &mut WarehouseGuard<'_>,
    amount: usize,
) -> Result<()> {
    if amount > source.occupied() {
        return Err(PortError::CapacityExceeded(format!(
            "source holds {} containers, {} requested",
            source.occupied(),
            amount
        )));
    }
    if amount > destination.free() {
        return Err(PortError::CapacityExceeded(format!(
            "destination has room for {} containers, {} requested",
            destination.free(),
            amount
        )));
    }

    let moved = source.try_take(amount).ok_or_else(|| {
        PortError::ConsistencyViolation(format!(
            "source refused to release {} containers it holds",
            amount
        ))
    })?;

    if !destination.try_add(&moved) {
        if !source.try_add(&moved) {
            return Err(PortError::ConsistencyViolation(format!(
                "{} containers lost: destination rejected them and source could not take them back",
                moved.len()
            )));
        }
        return Err(PortError::ConsistencyViolation(format!(
            "destination rejected {} containers after admission check; source restored",
            moved.len()
        )));
    }

    Ok(())
}
