//! Implementation of the `quay check` command.

use crate::cli::CheckArgs;
use quay::config::Config;
use quay::error::Result;
use quay::events::{Event, read_events};
use std::collections::BTreeMap;

/// Execute the `quay check` command.
///
/// Loading already validates; a summary is printed on success. With
/// `--events`, the event log of an earlier run is summarized as well.
pub fn cmd_check(args: CheckArgs) -> Result<()> {
    let config = Config::load(&args.path)?;
    print!("{}", summary(&config));

    if let Some(path) = &args.events {
        let events = read_events(path)?;
        println!();
        println!("Event log {}:", path.display());
        print!("{}", event_summary(&events));
    }
    Ok(())
}

pub(crate) fn summary(config: &Config) -> String {
    let mut out = String::new();
    out.push_str("Config OK\n");
    out.push_str(&format!(
        "  berths:      {} (wait up to {} ms)\n",
        config.berth_count, config.berth_timeout_ms
    ));
    out.push_str(&format!(
        "  port:        {}/{} containers\n",
        config.port_containers, config.port_capacity
    ));
    out.push_str(&format!("  ships:       {}\n", config.ships.len()));
    for ship in &config.ships {
        out.push_str(&format!(
            "    {:<12} {}/{}\n",
            ship.name, ship.containers, ship.capacity
        ));
    }
    out.push_str(&format!("  containers:  {}\n", config.total_containers()));
    out.push_str(&format!("  duration:    {} s\n", config.duration_secs));
    out
}

/// Per-ship counts of each logged action.
pub(crate) fn event_summary(events: &[Event]) -> String {
    let mut counts: BTreeMap<&str, BTreeMap<String, usize>> = BTreeMap::new();
    for event in events {
        *counts
            .entry(event.ship.as_str())
            .or_default()
            .entry(event.action.to_string())
            .or_default() += 1;
    }

    let mut out = format!("  {} events\n", events.len());
    for (ship, actions) in &counts {
        let line: Vec<String> = actions
            .iter()
            .map(|(action, count)| format!("{}={}", action, count))
            .collect();
        out.push_str(&format!("    {:<12} {}\n", ship, line.join(" ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quay::error::PortError;
    use quay::events::{EventAction, EventLog};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_check_accepts_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quay.yaml");
        fs::write(&path, Config::default().to_yaml().unwrap()).unwrap();

        cmd_check(CheckArgs { path, events: None }).unwrap();
    }

    #[test]
    fn test_check_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quay.yaml");
        fs::write(&path, "berth_count: 0\n").unwrap();

        let err = cmd_check(CheckArgs { path, events: None }).unwrap_err();
        assert!(matches!(err, PortError::Config(_)));
    }

    #[test]
    fn test_check_reads_event_log() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quay.yaml");
        fs::write(&path, Config::default().to_yaml().unwrap()).unwrap();
        let events_path = temp_dir.path().join("events.ndjson");
        let log = EventLog::open(&events_path).unwrap();
        log.append(&Event::new(EventAction::Moor, "Aurora")).unwrap();

        cmd_check(CheckArgs {
            path,
            events: Some(events_path),
        })
        .unwrap();
    }

    #[test]
    fn test_check_missing_event_log_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quay.yaml");
        fs::write(&path, Config::default().to_yaml().unwrap()).unwrap();

        let err = cmd_check(CheckArgs {
            path,
            events: Some(temp_dir.path().join("absent.ndjson")),
        })
        .unwrap_err();
        assert!(matches!(err, PortError::Io(_)));
    }

    #[test]
    fn test_event_summary_counts_per_ship() {
        let events = vec![
            Event::new(EventAction::Moor, "Aurora"),
            Event::new(EventAction::Load, "Aurora"),
            Event::new(EventAction::Moor, "Aurora"),
            Event::new(EventAction::MoorRefused, "Baltica"),
        ];

        let text = event_summary(&events);

        assert!(text.contains("4 events"));
        assert!(text.contains("load=1 moor=2"));
        assert!(text.contains("moor_refused=1"));
    }

    #[test]
    fn test_summary_lists_ships() {
        let config = Config::default();
        let text = summary(&config);

        assert!(text.starts_with("Config OK"));
        for ship in &config.ships {
            assert!(text.contains(&ship.name));
        }
    }
}
