//! Metrics emitted by the registry
//!
//! Everything goes through the `metrics` facade. Without an installed
//! recorder every call is a no-op.
//!
//! * `counters`: membership churn, picks and `NotConnected` failures
//! * `gauges`: current registry size
//! * `labels`: metric names and label keys

pub mod counters;
pub mod gauges;
pub mod labels;
