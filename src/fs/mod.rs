//! Filesystem utilities for quay.
//!
//! Config files written by `quay init` go through an atomic write so a
//! crash never leaves a half-written config behind.

pub mod atomic;

pub use atomic::atomic_write_file;
