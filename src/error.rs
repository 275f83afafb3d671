//! Error types for quay.
//!
//! Uses thiserror for derive macros. Transfer and mooring failures are ordinary,
//! recoverable outcomes; a consistency violation is a bug and is never retried.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for quay operations.
#[derive(Error, Debug)]
pub enum PortError {
    /// A bounded wait on a warehouse guard or on berth availability expired.
    #[error("timed out waiting for {0}")]
    Timeout(String),

    /// An admission or removal check failed at commit time.
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),

    /// The requester does not hold a berth.
    #[error("no berth held by {0}")]
    NotHeld(String),

    /// The requester already holds a berth and may not moor twice.
    #[error("{0} already holds a berth")]
    AlreadyHeld(String),

    /// A transfer named the berth's own warehouse as the counterpart.
    #[error("cannot transfer between a warehouse and itself")]
    SameWarehouse,

    /// An internal invariant was broken (berth counted twice, container lost).
    #[error("consistency violation: {0}")]
    ConsistencyViolation(String),

    /// Invalid configuration or arguments.
    #[error("{0}")]
    Config(String),

    /// Filesystem failure while reading config or writing events.
    #[error("{0}")]
    Io(String),
}

impl PortError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PortError::Config(_) | PortError::Io(_) => exit_codes::USER_ERROR,
            PortError::Timeout(_)
            | PortError::CapacityExceeded(_)
            | PortError::NotHeld(_)
            | PortError::AlreadyHeld(_)
            | PortError::SameWarehouse => exit_codes::TRANSFER_FAILURE,
            PortError::ConsistencyViolation(_) => exit_codes::CONSISTENCY_FAILURE,
        }
    }

    /// Whether a caller may simply try again later (possibly with a smaller amount).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PortError::Timeout(_) | PortError::CapacityExceeded(_)
        )
    }
}

/// Result type alias for quay operations.
pub type Result<T> = std::result::Result<T, PortError>;
