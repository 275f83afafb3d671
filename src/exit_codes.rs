//! Exit code constants for the quay CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config, unreadable files)
//! - 2: Transfer failure (timeout, capacity, mooring contract)
//! - 3: Consistency violation (containers lost or duplicated)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, or filesystem failure.
pub const USER_ERROR: i32 = 1;

/// Transfer failure: a timeout, capacity check or mooring contract failed.
pub const TRANSFER_FAILURE: i32 = 2;

/// Consistency violation: an invariant of the port was broken.
pub const CONSISTENCY_FAILURE: i32 = 3;
