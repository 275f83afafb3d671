//! Bounded container storage.
//!
//! A [`Warehouse`] holds at most `capacity` containers behind its own guard.
//! Every mutation is admission-controlled and all-or-nothing:
//! - `try_add` admits a whole batch or nothing
//! - `try_take` removes exactly `amount` containers or nothing
//!
//! # Guards
//!
//! The transfer protocol needs to hold two warehouse guards at once and mutate
//! both under them. [`Warehouse::lock_for`] hands out a scoped [`WarehouseGuard`]
//! with a bounded wait; the guard exposes the same admission-controlled
//! operations and releases the warehouse when dropped.

mod container;
mod store;


// Re-export public API
pub use container::{Container, ContainerId, ContainerSequence};
pub use store::{Warehouse, WarehouseGuard};
