//! Quay: concurrent port simulation.
//!
//! Ships run on their own threads and trade containers with a shared port
//! warehouse. A ship must hold one of a fixed number of berths to trade, and
//! every transfer locks the berth's home warehouse before the ship's, waits a
//! bounded time for each lock, and moves containers all-or-nothing.
//!
//! The core lives in [`warehouse`] and [`port`]. [`ship`] and [`harbor`]
//! drive it; the remaining modules carry config, logging and errors.

pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod harbor;
pub mod logging;
pub mod port;
pub mod ship;
pub mod warehouse;
