//! Process wiring: a port, its ships, and a bounded run.
//!
//! A [`Harbor`] is built from a [`Config`](crate::config::Config). It stocks the
//! port and every ship from a single container sequence, runs each ship on its
//! own thread for a fixed time, stops them, and checks that every container is
//! still accounted for exactly once.

mod model;
mod report;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Harbor;
pub use report::{HarborReport, ShipReport, WarehouseReport};
