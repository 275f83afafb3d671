//! Tests for harbor wiring and runs.

use super::*;
use crate::config::{Config, ShipConfig};
use crate::error::PortError;
use crate::events::read_events;
use std::time::Duration;
use tempfile::TempDir;

fn quick_config() -> Config {
    let mut config = Config::default();
    config.berth_count = 2;
    config.port_capacity = 40;
    config.port_containers = 20;
    config.berth_timeout_ms = 200;
    config.lock_timeout_ms = 200;
    config.sea_time_ms = 2;
    config.max_load = 6;
    config.seed = Some(11);
    config.ships = vec![
        ShipConfig::new("Aurora", 15, 5),
        ShipConfig::new("Baltica", 12, 12),
        ShipConfig::new("Corsair", 10, 0),
        ShipConfig::new("Dauntless", 20, 8),
    ];
    config
}

#[test]
fn test_from_config_stocks_unique_containers() {
    let harbor = Harbor::from_config(quick_config()).unwrap();

    assert_eq!(harbor.manifest().len(), 45);
    let mut deduped = harbor.manifest().to_vec();
    deduped.dedup();
    assert_eq!(deduped.len(), 45);

    assert_eq!(harbor.port().warehouse().occupied(), 20);
    assert_eq!(harbor.ships().len(), 4);
    assert_eq!(harbor.ships()[1].warehouse().occupied(), 12);
    harbor.check_conservation().unwrap();
}

#[test]
fn test_from_config_rejects_invalid_config() {
    let mut config = quick_config();
    config.berth_count = 0;

    let err = Harbor::from_config(config).unwrap_err();
    assert!(matches!(err, PortError::Config(_)));
}

#[test]
fn test_run_conserves_containers() {
    let harbor = Harbor::from_config(quick_config()).unwrap();

    let report = harbor.run(Duration::from_millis(300)).unwrap();

    assert_eq!(report.total_containers, 45);
    assert_eq!(report.berths, 2);
    assert_eq!(report.ships.len(), 4);
    let on_ships: usize = report.ships.iter().map(|s| s.warehouse.occupied).sum();
    assert_eq!(report.port.occupied + on_ships, 45);
    assert!(report.port.occupied <= report.port.capacity);
    for ship in &report.ships {
        assert!(ship.warehouse.occupied <= ship.warehouse.capacity);
    }
    assert!(report.ships.iter().any(|s| s.stats.port_calls > 0));
    assert_eq!(harbor.port().berths().available(), 2);
    assert!(harbor.ships().iter().all(|s| s.is_stopped()));
}

#[test]
fn test_run_with_single_berth_and_contention() {
    let mut config = quick_config();
    config.berth_count = 1;
    config.berth_timeout_ms = 5;
    let harbor = Harbor::from_config(config).unwrap();

    let report = harbor.run(Duration::from_millis(300)).unwrap();

    let on_ships: usize = report.ships.iter().map(|s| s.warehouse.occupied).sum();
    assert_eq!(report.port.occupied + on_ships, 45);
    harbor.check_conservation().unwrap();
}

#[test]
fn test_run_writes_event_log() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("events.ndjson");
    let mut config = quick_config();
    config.event_log = Some(path.clone());
    let harbor = Harbor::from_config(config).unwrap();

    harbor.run(Duration::from_millis(200)).unwrap();

    let events = read_events(&path).unwrap();
    assert!(!events.is_empty());
    let names = ["Aurora", "Baltica", "Corsair", "Dauntless"];
    assert!(events.iter().all(|e| names.contains(&e.ship.as_str())));
}

#[test]
fn test_check_conservation_detects_missing_containers() {
    let harbor = Harbor::from_config(quick_config()).unwrap();

    let taken = harbor.port().warehouse().try_take(2).unwrap();
    let err = harbor.check_conservation().unwrap_err();

    assert!(matches!(err, PortError::ConsistencyViolation(_)));
    assert!(err.to_string().contains("2 missing"));

    assert!(harbor.port().warehouse().try_add(&taken));
    harbor.check_conservation().unwrap();
}

#[test]
fn test_check_conservation_detects_duplicates() {
    let harbor = Harbor::from_config(quick_config()).unwrap();

    let copy = harbor.ships()[0].warehouse().try_take(1).unwrap();
    assert!(harbor.ships()[0].warehouse().try_add(&copy));
    assert!(harbor.port().warehouse().try_add(&copy));

    let err = harbor.check_conservation().unwrap_err();
    assert!(err.to_string().contains("1 duplicated"));
}

#[test]
fn test_run_without_ships_returns_immediately() {
    let mut config = quick_config();
    config.ships.clear();
    let harbor = Harbor::from_config(config).unwrap();

    let report = harbor.run(Duration::from_secs(5)).unwrap();

    assert!(report.ships.is_empty());
    assert!(report.elapsed_ms < 5_000);
    assert_eq!(report.port.occupied, 20);
}

#[test]
fn test_run_with_unbounded_duration_ends_when_ships_stop() {
    let harbor = Harbor::from_config(quick_config()).unwrap();

    let report = std::thread::scope(|scope| {
        let handle = scope.spawn(|| harbor.run(Duration::from_secs(u64::MAX)));
        std::thread::sleep(Duration::from_millis(150));
        harbor.stop_all();
        handle.join().unwrap()
    })
    .unwrap();

    let on_ships: usize = report.ships.iter().map(|s| s.warehouse.occupied).sum();
    assert_eq!(report.port.occupied + on_ships, 45);
}

#[test]
fn test_report_display_lists_ships() {
    let harbor = Harbor::from_config(quick_config()).unwrap();
    let report = harbor.run(Duration::from_millis(50)).unwrap();

    let text = report.to_string();
    assert!(text.contains("Port warehouse:"));
    for name in ["Aurora", "Baltica", "Corsair", "Dauntless"] {
        assert!(text.contains(name));
    }
}

#[test]
fn test_report_serializes_to_json() {
    let report = HarborReport {
        elapsed_ms: 1500,
        berths: 2,
        total_containers: 3,
        port: WarehouseReport {
            capacity: 10,
            occupied: 3,
        },
        ships: Vec::new(),
    };

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["port"]["occupied"], 3);
    assert_eq!(json["elapsed_ms"], 1500);
}
