//! Event logging subsystem for quay.
//!
//! This module implements an append-only log of what ships did at the port.
//! Events are stored in NDJSON format (one JSON object per line).
//!
//! # Event Format
//!
//! Each event is a JSON object with the following fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: The action performed (moor, unmoor, unload, load, etc.)
//! - `ship`: The ship that performed it
//! - `berth`: Optional berth number for actions taken at a berth
//! - `details`: Freeform object with action-specific details
//!
//! # Concurrency
//!
//! Every ship thread appends through the same [`EventLog`]. The file handle
//! sits behind a mutex so each event lands as one whole line.
//!
//! ```no_run
//! use quay::events::{Event, EventAction, EventLog};
//! use serde_json::json;
//!
//! let log = EventLog::open("events.ndjson")?;
//! let event = Event::new(EventAction::Moor, "Aurora")
//!     .with_berth(1)
//!     .with_details(json!({"available": 0}));
//! log.append(&event)?;
//! # Ok::<(), quay::error::PortError>(())
//! ```

use crate::error::{PortError, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Ship took a berth
    Moor,
    /// Ship was refused a berth
    MoorRefused,
    /// Ship left its berth
    Unmoor,
    /// Containers moved ship -> port
    Unload,
    /// Containers moved port -> ship
    Load,
    /// A transfer was refused (timeout or capacity)
    TransferRefused,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Moor => write!(f, "moor"),
            EventAction::MoorRefused => write!(f, "moor_refused"),
            EventAction::Unmoor => write!(f, "unmoor"),
            EventAction::Unload => write!(f, "unload"),
            EventAction::Load => write!(f, "load"),
            EventAction::TransferRefused => write!(f, "transfer_refused"),
        }
    }
}

/// An event record for the port log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The ship that performed the action.
    pub ship: String,

    /// Berth number for actions taken at a berth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub berth: Option<u32>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event stamped with the current time.
    pub fn new(action: EventAction, ship: impl Into<String>) -> Self {
        Self {
            ts: Utc::now(),
            action,
            ship: ship.into(),
            berth: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_berth(mut self, berth: u32) -> Self {
        self.berth = Some(berth);
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| PortError::Io(format!("failed to serialize event to JSON: {}", e)))
    }
}

/// Shared append-only NDJSON event file.
#[derive(Debug)]
pub struct EventLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl EventLog {
    /// Open (or create) the event file for appending.
    ///
    /// Missing parent directories are created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                PortError::Io(format!(
                    "failed to create events directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                PortError::Io(format!(
                    "failed to open events file '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event as a single JSON line with a trailing newline.
    pub fn append(&self, event: &Event) -> Result<()> {
        let json_line = event.to_ndjson_line()?;

        let mut file = self.file.lock();
        writeln!(file, "{}", json_line).map_err(|e| {
            PortError::Io(format!(
                "failed to write event to '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Flush the file to disk.
    pub fn sync(&self) -> Result<()> {
        self.file.lock().sync_all().map_err(|e| {
            PortError::Io(format!(
                "failed to sync events file '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// Read every event from an NDJSON file.
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<Event>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        PortError::Io(format!(
            "failed to read events file '{}': {}",
            path.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line)
                .map_err(|e| PortError::Io(format!("failed to parse event line: {}", e)))
        })
        .collect()
}
