//! Metric names and label keys

/// Counter: connections appended by `add()`
pub const CONNECTIONS_ADDED: &str = "connection_registry_connections_added_total";
/// Counter: connections removed after their close notification
pub const CONNECTIONS_REMOVED: &str = "connection_registry_connections_removed_total";
/// Counter: state-dependent queries rejected because the registry was empty
pub const NOT_CONNECTED: &str = "connection_registry_not_connected_total";
/// Counter: successful `pick()` calls
pub const PICKS: &str = "connection_registry_picks_total";
/// Gauge: connections currently registered
pub const CONNECTIONS: &str = "connection_registry_connections";

/// Registry name label
pub const REGISTRY: &str = "registry";
/// Operation label
pub const OPERATION: &str = "operation";

/// Operation label value for `pick()`
pub const OP_PICK: &str = "pick";
/// Operation label value for `for_each()`
pub const OP_FOR_EACH: &str = "for_each";
/// Operation label value for view iteration
pub const OP_ITER: &str = "iter";
