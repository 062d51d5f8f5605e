//! Snapshot and export of cache and pool counters.
//!
//! Enabled by the `metrics` feature (on by default).

pub mod exporter;
pub mod snapshot;
pub mod traits;
