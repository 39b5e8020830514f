//! Counter helpers

use super::labels;

/// Record a batch appended by `add()`
pub fn connections_added(registry: &str, count: usize) {
    metrics::counter!(labels::CONNECTIONS_ADDED, labels::REGISTRY => registry.to_string())
        .increment(count as u64);
}

/// Record one close-triggered removal
pub fn connection_removed(registry: &str) {
    metrics::counter!(labels::CONNECTIONS_REMOVED, labels::REGISTRY => registry.to_string())
        .increment(1);
}

/// Record a query rejected with `NotConnected`
pub fn not_connected(registry: &str, operation: &'static str) {
    metrics::counter!(
        labels::NOT_CONNECTED,
        labels::REGISTRY => registry.to_string(),
        labels::OPERATION => operation
    )
    .increment(1);
}

/// Record a successful pick
pub fn picked(registry: &str) {
    metrics::counter!(labels::PICKS, labels::REGISTRY => registry.to_string()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_without_recorder_are_noops() {
        connections_added("test", 3);
        connection_removed("test");
        not_connected("test", labels::OP_PICK);
        picked("test");
    }
}
