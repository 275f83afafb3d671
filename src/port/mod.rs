//! Berth allocation and container transfer for a port.
//!
//! This module implements the concurrency core of quay:
//! - [`Berth`]: an exclusive access point bound to the port warehouse, which
//!   runs the ordered dual-lock transfer (`push`/`pull`)
//! - [`BerthPool`]: bounded, blocking acquire/release of berths keyed by requester
//! - [`Mooring`]: RAII guard returning a berth to its pool when dropped
//! - [`Port`]: the warehouse plus its pool, built explicitly and shared by reference
//!
//! # Lock Order
//!
//! Every transfer goes through a berth, and every berth of a port is bound to
//! the same warehouse. A transfer always locks that home warehouse first and
//! the ship's warehouse second, so two transfers can never wait on each other
//! in a cycle. Each guard acquisition is bounded by a timeout.

mod berth;
mod model;
mod mooring;
mod pool;


// Re-export public API
pub use berth::{Berth, BerthId, DEFAULT_LOCK_TIMEOUT};
pub use model::{Port, ShipId};
pub use mooring::Mooring;
pub use pool::{BerthPool, DEFAULT_ACQUIRE_TIMEOUT};
