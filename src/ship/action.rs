//! What a ship decides to do once moored.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The transfer a moored ship asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipAction {
    /// Move containers from the ship into the port warehouse.
    Unload,
    /// Move containers from the port warehouse onto the ship.
    Load,
}

/// Pick the next action. An empty ship always loads; otherwise it is a coin toss.
pub fn next_action<G: Rng>(on_board: usize, rng: &mut G) -> ShipAction {
    if on_board == 0 || rng.gen_bool(0.5) {
        ShipAction::Load
    } else {
        ShipAction::Unload
    }
}

/// How many containers to unload: between one and everything on board.
///
/// Never more than the ship carries; returns 0 only for an empty ship.
pub fn unload_amount<G: Rng>(on_board: usize, rng: &mut G) -> usize {
    if on_board == 0 {
        return 0;
    }
    rng.gen_range(1..=on_board)
}

/// How many containers to ask for when loading: between one and `max_load`.
pub fn load_amount<G: Rng>(max_load: usize, rng: &mut G) -> usize {
    rng.gen_range(1..=max_load.max(1))
}
