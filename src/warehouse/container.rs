//! Container identity.

use serde::{Deserialize, Serialize};

/// Opaque, stable identity of a single container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(pub u64);

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C-{:05}", self.0)
    }
}

/// A unit of cargo. Containers are interchangeable apart from their id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Container {
    id: ContainerId,
}

impl Container {
    pub fn new(id: u64) -> Self {
        Self {
            id: ContainerId(id),
        }
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }
}

/// Hands out containers with ids that never repeat within one sequence.
///
/// The harbor uses a single sequence to stock the port and every ship so
/// that container ids are unique across the whole run.
#[derive(Debug, Default)]
pub struct ContainerSequence {
    next: u64,
}

impl ContainerSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce `count` fresh containers.
    pub fn take(&mut self, count: usize) -> Vec<Container> {
        let start = self.next;
        self.next += count as u64;
        (start..self.next).map(Container::new).collect()
    }

    /// Number of containers produced so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}
