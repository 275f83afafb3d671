//! Harbor construction and the threaded run.

use super::report::{HarborReport, ShipReport, WarehouseReport};
use crate::config::Config;
use crate::error::{PortError, Result};
use crate::events::EventLog;
use crate::port::Port;
use crate::ship::{Ship, ShipStats};
use crate::warehouse::{ContainerId, ContainerSequence};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::thread;
use std::time::{Duration, Instant};

/// How often the supervising thread checks whether every ship has stopped.
const WAIT_TICK: Duration = Duration::from_millis(20);

/// A port together with the ships that call at it.
#[derive(Debug)]
pub struct Harbor {
    config: Config,
    port: Port,
    ships: Vec<Ship>,
    events: Option<EventLog>,

    /// Sorted ids of every container present when the harbor was built.
    manifest: Vec<ContainerId>,
}

impl Harbor {
    /// Build the port and ships described by `config`.
    ///
    /// Container ids are unique across the port and all ships. If the config
    /// names an event log it is opened for appending.
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;

        let mut sequence = ContainerSequence::new();
        let port = Port::from_config(&config, sequence.take(config.port_containers))?;
        let ships = config
            .ships
            .iter()
            .map(|entry| Ship::from_config(entry, &config, sequence.take(entry.containers)))
            .collect::<Result<Vec<_>>>()?;
        let events = match &config.event_log {
            Some(path) => Some(EventLog::open(path)?),
            None => None,
        };

        let mut harbor = Self {
            config,
            port,
            ships,
            events,
            manifest: Vec::new(),
        };
        harbor.manifest = harbor.inventory();
        if harbor.manifest.len() as u64 != sequence.issued() {
            return Err(PortError::ConsistencyViolation(format!(
                "issued {} containers but stocked {}",
                sequence.issued(),
                harbor.manifest.len()
            )));
        }

        tracing::info!(
            berths = harbor.port.berths().berth_count(),
            ships = harbor.ships.len(),
            containers = sequence.issued(),
            "harbor ready"
        );
        Ok(harbor)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn port(&self) -> &Port {
        &self.port
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Ids of every container present when the harbor was built.
    pub fn manifest(&self) -> &[ContainerId] {
        &self.manifest
    }

    /// Sorted ids of every container currently in the port or on a ship.
    pub fn inventory(&self) -> Vec<ContainerId> {
        let mut ids = self.port.warehouse().contents();
        for ship in &self.ships {
            ids.extend(ship.warehouse().contents());
        }
        ids.sort_unstable();
        ids
    }

    /// Verify that no container was lost or duplicated since construction.
    pub fn check_conservation(&self) -> Result<()> {
        let inventory = self.inventory();
        if inventory == self.manifest {
            return Ok(());
        }

        let missing = self
            .manifest
            .iter()
            .filter(|id| inventory.binary_search(id).is_err())
            .count();
        let duplicated = inventory.windows(2).filter(|w| w[0] == w[1]).count();
        Err(PortError::ConsistencyViolation(format!(
            "expected {} containers, found {} ({} missing, {} duplicated)",
            self.manifest.len(),
            inventory.len(),
            missing,
            duplicated
        )))
    }

    /// Ask every ship to stop after its current port call.
    pub fn stop_all(&self) {
        for ship in &self.ships {
            ship.stop();
        }
    }

    /// Run every ship on its own thread for `duration`, then stop and join them.
    ///
    /// A ship that fails with a non-recoverable error stops the whole run.
    /// Container conservation is checked after all ships have joined.
    pub fn run(&self, duration: Duration) -> Result<HarborReport> {
        let started = Instant::now();
        let seed = self.config.seed;
        let events = self.events.as_ref();

        let results: Vec<Result<ShipStats>> = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.ships.len());
            for (index, ship) in self.ships.iter().enumerate() {
                let spawned = thread::Builder::new()
                    .name(format!("ship-{}", ship.id()))
                    .spawn_scoped(scope, move || {
                        let mut rng = match seed {
                            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
                            None => StdRng::from_entropy(),
                        };
                        let outcome = ship.run(&self.port, &mut rng, events);
                        if outcome.is_err() {
                            self.stop_all();
                        }
                        outcome
                    });
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        self.stop_all();
                        return Err(PortError::Io(format!(
                            "failed to launch ship '{}': {}",
                            ship.id(),
                            e
                        )));
                    }
                }
            }

            self.wait(duration);
            self.stop_all();

            Ok(handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(PortError::ConsistencyViolation(
                            "ship thread panicked".to_string(),
                        ))
                    })
                })
                .collect())
        })?;

        let mut failure = None;
        let mut reports = Vec::with_capacity(self.ships.len());
        for (ship, result) in self.ships.iter().zip(results) {
            let stats = match result {
                Ok(stats) => stats,
                Err(err) => {
                    tracing::error!(ship = %ship.id(), error = %err, "ship run failed");
                    if failure.is_none() {
                        failure = Some(err);
                    }
                    ShipStats::default()
                }
            };
            reports.push(ShipReport {
                name: ship.id().to_string(),
                warehouse: WarehouseReport::from(ship.warehouse()),
                stats,
            });
        }

        self.check_conservation()?;
        if let Some(err) = failure {
            return Err(err);
        }
        if let Some(log) = events {
            log.sync()?;
        }

        let report = HarborReport {
            elapsed_ms: started.elapsed().as_millis() as u64,
            berths: self.port.berths().berth_count(),
            total_containers: self.manifest.len(),
            port: WarehouseReport::from(self.port.warehouse().as_ref()),
            ships: reports,
        };
        tracing::info!(
            elapsed_ms = report.elapsed_ms,
            port_occupied = report.port.occupied,
            "harbor run finished"
        );
        Ok(report)
    }

    /// Block until `duration` has passed or every ship has stopped on its own.
    ///
    /// A duration past the end of representable time never expires.
    fn wait(&self, duration: Duration) {
        let deadline = Instant::now().checked_add(duration);
        loop {
            if self.ships.iter().all(Ship::is_stopped) {
                return;
            }
            let nap = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return;
                    }
                    (deadline - now).min(WAIT_TICK)
                }
                None => WAIT_TICK,
            };
            thread::sleep(nap);
        }
    }
}
