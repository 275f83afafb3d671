//! Ship state and its sailing loop.

use super::action::{ShipAction, load_amount, next_action, unload_amount};
use crate::config::{Config, ShipConfig};
use crate::error::Result;
use crate::events::{Event, EventAction, EventLog};
use crate::port::{Port, ShipId};
use crate::warehouse::{Container, Warehouse};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Longest single sleep while at sea, so a stop request is noticed promptly.
const SEA_TICK: Duration = Duration::from_millis(50);

/// Counters a ship keeps over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipStats {
    pub port_calls: u64,
    pub moorings_refused: u64,
    pub unloads: u64,
    pub unloads_refused: u64,
    pub loads: u64,
    pub loads_refused: u64,
    pub containers_unloaded: u64,
    pub containers_loaded: u64,
}

impl ShipStats {
    fn record_transfer(&mut self, action: ShipAction, amount: usize) {
        match action {
            ShipAction::Unload => {
                self.unloads += 1;
                self.containers_unloaded += amount as u64;
            }
            ShipAction::Load => {
                self.loads += 1;
                self.containers_loaded += amount as u64;
            }
        }
    }

    fn record_refusal(&mut self, action: ShipAction) {
        match action {
            ShipAction::Unload => self.unloads_refused += 1,
            ShipAction::Load => self.loads_refused += 1,
        }
    }
}

/// A ship that alternates between sailing and calling at a port.
///
/// The ship owns its warehouse; a berth only borrows it for the duration of
/// a transfer.
#[derive(Debug)]
pub struct Ship {
    id: ShipId,
    warehouse: Warehouse,
    sea_time: Duration,
    max_load: usize,
    stopped: AtomicBool,
}

impl Ship {
    pub fn new(id: ShipId, warehouse: Warehouse, sea_time: Duration, max_load: usize) -> Self {
        Self {
            id,
            warehouse,
            sea_time,
            max_load,
            stopped: AtomicBool::new(false),
        }
    }

    /// Build a ship from its config entry with `containers` on board.
    pub fn from_config(
        ship: &ShipConfig,
        config: &Config,
        containers: Vec<Container>,
    ) -> Result<Self> {
        let warehouse = Warehouse::with_containers(ship.capacity, containers)?;
        Ok(Self::new(
            ShipId::new(ship.name.as_str()),
            warehouse,
            config.sea_time(),
            config.max_load,
        ))
    }

    pub fn id(&self) -> &ShipId {
        &self.id
    }

    pub fn warehouse(&self) -> &Warehouse {
        &self.warehouse
    }

    /// Ask the ship to stop after its current port call.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Sail and call at `port` until stopped.
    ///
    /// Timeouts and capacity refusals are counted and the ship sails on.
    /// Any other failure ends the run and is returned.
    pub fn run<G: Rng>(
        &self,
        port: &Port,
        rng: &mut G,
        events: Option<&EventLog>,
    ) -> Result<ShipStats> {
        let mut stats = ShipStats::default();
        tracing::info!(ship = %self.id, on_board = self.warehouse.occupied(), "ship sailing");

        while !self.is_stopped() {
            self.at_sea();
            if self.is_stopped() {
                break;
            }
            self.call_at_port(port, rng, events, &mut stats)?;
            tracing::debug!(
                ship = %self.id,
                on_board = self.warehouse.occupied(),
                "ship back at sea"
            );
        }

        tracing::info!(ship = %self.id, port_calls = stats.port_calls, "ship stopped");
        Ok(stats)
    }

    /// One port call: moor, transfer once, unmoor.
    pub fn call_at_port<G: Rng>(
        &self,
        port: &Port,
        rng: &mut G,
        events: Option<&EventLog>,
        stats: &mut ShipStats,
    ) -> Result<()> {
        stats.port_calls += 1;

        let mooring = match port.berths().moor(self.id.clone()) {
            Ok(mooring) => mooring,
            Err(err) if err.is_recoverable() => {
                stats.moorings_refused += 1;
                tracing::debug!(ship = %self.id, error = %err, "ship refused a berth");
                self.record(events, Event::new(EventAction::MoorRefused, self.id.as_str()));
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        let berth = mooring.berth();
        self.record(
            events,
            Event::new(EventAction::Moor, self.id.as_str()).with_berth(berth.id().0),
        );

        let action = next_action(self.warehouse.occupied(), rng);
        let (amount, outcome) = match action {
            ShipAction::Unload => {
                let amount = unload_amount(self.warehouse.occupied(), rng);
                (amount, berth.try_push(&self.warehouse, amount))
            }
            ShipAction::Load => {
                let amount = load_amount(self.max_load, rng);
                (amount, berth.try_pull(&self.warehouse, amount))
            }
        };

        match outcome {
            Ok(()) => {
                stats.record_transfer(action, amount);
                tracing::debug!(ship = %self.id, berth = berth.id().0, ?action, amount, "transfer done");
                let kind = match action {
                    ShipAction::Unload => EventAction::Unload,
                    ShipAction::Load => EventAction::Load,
                };
                self.record(
                    events,
                    Event::new(kind, self.id.as_str())
                        .with_berth(berth.id().0)
                        .with_details(json!({
                            "amount": amount,
                            "on_board": self.warehouse.occupied(),
                            "port_occupied": port.warehouse().occupied(),
                        })),
                );
            }
            Err(err) if err.is_recoverable() => {
                stats.record_refusal(action);
                match action {
                    ShipAction::Unload => tracing::debug!(
                        ship = %self.id,
                        amount,
                        port_free = port.warehouse().free(),
                        error = %err,
                        "port could not take the cargo"
                    ),
                    ShipAction::Load => tracing::debug!(
                        ship = %self.id,
                        amount,
                        ship_free = self.warehouse.free(),
                        error = %err,
                        "ship could not load from port"
                    ),
                }
                self.record(
                    events,
                    Event::new(EventAction::TransferRefused, self.id.as_str())
                        .with_berth(berth.id().0)
                        .with_details(json!({
                            "action": action,
                            "amount": amount,
                            "reason": err.to_string(),
                        })),
                );
            }
            Err(err) => {
                tracing::error!(ship = %self.id, ?action, amount, error = %err, "transfer failed");
                return Err(err);
            }
        }

        let berth_id = berth.id();
        mooring.release()?;
        self.record(
            events,
            Event::new(EventAction::Unmoor, self.id.as_str()).with_berth(berth_id.0),
        );
        Ok(())
    }

    /// Sleep for the sea time, waking early on a stop request.
    fn at_sea(&self) {
        let deadline = Instant::now().checked_add(self.sea_time);
        while !self.is_stopped() {
            let nap = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return;
                    }
                    (deadline - now).min(SEA_TICK)
                }
                None => SEA_TICK,
            };
            std::thread::sleep(nap);
        }
    }

    fn record(&self, events: Option<&EventLog>, event: Event) {
        if let Some(log) = events
            && let Err(e) = log.append(&event)
        {
            tracing::warn!(ship = %self.id, error = %e, "failed to record event");
        }
    }
}
