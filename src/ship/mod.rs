//! Ships: the actors that call at a port.
//!
//! A ship sails, asks the port for a berth, performs one transfer through it
//! and leaves again, until it is told to stop. The decision of what to do
//! and how much to move is random; the transfer itself is entirely up to the
//! berth's protocol.

mod action;
mod model;


// Re-export public API
pub use action::{ShipAction, load_amount, next_action, unload_amount};
pub use model::{Ship, ShipStats};
