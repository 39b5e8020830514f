//! Gauge helpers

use super::labels;

/// Publish the current number of registered connections
pub fn connections(registry: &str, len: usize) {
    metrics::gauge!(labels::CONNECTIONS, labels::REGISTRY => registry.to_string()).set(len as f64);
}
