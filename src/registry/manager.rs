//! Core registry type

use super::state::RegistryState;
use super::strategy::{RandomStrategy, SelectionStrategy};
use super::view::ConnectionsView;
use crate::connection::Connection;
use crate::metrics::{counters, gauges, labels};
use crate::{Error, Result};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Name used in tracing events and metric labels (default: "default")
    pub name: String,
}

impl RegistryConfig {
    /// Create configuration with the given registry name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new("default")
    }
}

/// Builder for creating a `ConnectionRegistry` with a name and strategy
///
/// # Examples
///
/// ```
/// use connection_registry::{CloseHandler, Connection, ConnectionRegistry, RandomStrategy};
///
/// #[derive(Clone)]
/// struct Node;
///
/// impl Connection for Node {
///     fn on_closed(&self, _handler: CloseHandler) {}
/// }
///
/// let registry = ConnectionRegistry::<Node>::builder()
///     .name("cluster-east")
///     .strategy(RandomStrategy)
///     .build();
///
/// assert_eq!(registry.config().name, "cluster-east");
/// ```
pub struct RegistryBuilder<C> {
    config: RegistryConfig,
    strategy: Option<Arc<dyn SelectionStrategy<C>>>,
}

impl<C: Connection> RegistryBuilder<C> {
    /// Set the registry name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the selection strategy used by `pick()`
    ///
    /// Pass an `Arc` to share one stateless strategy between registries.
    pub fn strategy<S>(mut self, strategy: S) -> Self
    where
        S: SelectionStrategy<C> + 'static,
    {
        self.strategy = Some(Arc::new(strategy));
        self
    }

    /// Build the registry
    pub fn build(self) -> ConnectionRegistry<C> {
        let strategy: Arc<dyn SelectionStrategy<C>> = match self.strategy {
            Some(strategy) => strategy,
            None => Arc::new(RandomStrategy::new()),
        };

        ConnectionRegistry {
            shared: Arc::new(Shared {
                config: self.config,
                strategy,
                members: Mutex::new(Members::new()),
            }),
        }
    }
}

/// Managed sequence
///
/// `entry_ids` runs parallel to `connections`. Ids are handed out in
/// increasing order and only ever appended, so the vector stays sorted.
struct Members<C> {
    connections: Vec<C>,
    entry_ids: Vec<u64>,
    next_entry_id: u64,
}

impl<C> Members<C> {
    fn new() -> Self {
        Self {
            connections: Vec::new(),
            entry_ids: Vec::new(),
            next_entry_id: 0,
        }
    }

    fn push(&mut self, connection: C) -> u64 {
        let entry_id = self.next_entry_id;
        self.next_entry_id += 1;
        self.connections.push(connection);
        self.entry_ids.push(entry_id);
        entry_id
    }

    fn remove(&mut self, entry_id: u64) -> bool {
        match self.entry_ids.binary_search(&entry_id) {
            Ok(idx) => {
                self.entry_ids.remove(idx);
                self.connections.remove(idx);
                true
            }
            Err(_) => false,
        }
    }

    fn len(&self) -> usize {
        self.connections.len()
    }

    fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

struct Shared<C> {
    config: RegistryConfig,
    strategy: Arc<dyn SelectionStrategy<C>>,
    members: Mutex<Members<C>>,
}

impl<C: Connection> Shared<C> {
    /// Close handler body: drop one entry if it is still registered
    fn remove_entry(&self, entry_id: u64) {
        let mut members = self.members.lock();
        if !members.remove(entry_id) {
            tracing::trace!(
                registry = %self.config.name,
                entry_id,
                "close notification for unregistered entry ignored"
            );
            return;
        }

        // Published under the lock so concurrent mutations land in order
        let len = members.len();
        gauges::connections(&self.config.name, len);
        if len == 0 {
            tracing::info!(registry = %self.config.name, "registry drained, no live connections");
        }
        drop(members);

        tracing::debug!(
            registry = %self.config.name,
            entry_id,
            remaining = len,
            "connection closed, removed from registry"
        );
        counters::connection_removed(&self.config.name);
    }
}

/// Thread-safe registry of live connections
///
/// Connections are added in batches and leave on their own when their close
/// notification fires. Every operation runs under one exclusive lock held
/// only for the duration of the call.
///
/// Cloning the registry yields another handle to the same membership.
pub struct ConnectionRegistry<C> {
    shared: Arc<Shared<C>>,
}

impl<C: Connection> ConnectionRegistry<C> {
    /// Create an empty registry using uniform random selection
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create an empty registry with a custom selection strategy
    pub fn with_strategy<S>(strategy: S) -> Self
    where
        S: SelectionStrategy<C> + 'static,
    {
        Self::builder().strategy(strategy).build()
    }

    /// Create a builder for a named registry or a custom strategy
    pub fn builder() -> RegistryBuilder<C> {
        RegistryBuilder {
            config: RegistryConfig::default(),
            strategy: None,
        }
    }

    /// Registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.shared.config
    }

    /// Append a batch of connections
    ///
    /// The whole batch becomes visible atomically, in order, after any
    /// connections already registered. Each connection then gets its own
    /// close subscription; adding the same connection twice tracks two
    /// independent entries.
    pub fn add<I>(&self, connections: I)
    where
        I: IntoIterator<Item = C>,
    {
        let batch: Vec<C> = connections.into_iter().collect();
        if batch.is_empty() {
            return;
        }

        let name = &self.shared.config.name;
        let subscriptions: Vec<(u64, C)> = {
            let mut members = self.shared.members.lock();
            let was_empty = members.is_empty();

            let subscriptions: Vec<(u64, C)> = batch
                .into_iter()
                .map(|connection| (members.push(connection.clone()), connection))
                .collect();
            let len = members.len();
            gauges::connections(name, len);
            if was_empty {
                tracing::info!(registry = %name, total = len, "registry populated");
            }
            drop(members);

            tracing::debug!(
                registry = %name,
                added = subscriptions.len(),
                total = len,
                "connections added"
            );
            counters::connections_added(name, subscriptions.len());

            subscriptions
        };

        // Subscribed outside the lock: an already-closed connection may run
        // its handler synchronously, and the handler locks the registry.
        for (entry_id, connection) in subscriptions {
            let shared: Weak<Shared<C>> = Arc::downgrade(&self.shared);
            connection.on_closed(Box::new(move || {
                if let Some(shared) = shared.upgrade() {
                    shared.remove_entry(entry_id);
                }
            }));
        }
    }

    /// Check whether at least one connection is registered
    pub fn is_connected(&self) -> bool {
        !self.shared.members.lock().is_empty()
    }

    /// Number of registered entries (duplicates counted separately)
    pub fn len(&self) -> usize {
        self.shared.members.lock().len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        !self.is_connected()
    }

    /// Current observable state
    pub fn state(&self) -> RegistryState {
        RegistryState::for_len(self.len())
    }

    /// Independent copy of the registered connections in insertion order
    pub fn snapshot(&self) -> Vec<C> {
        self.shared.members.lock().connections.clone()
    }

    /// Choose one connection using the configured strategy
    ///
    /// The emptiness check and the strategy call observe the same locked
    /// view, so the strategy never sees an empty slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] if no connections are registered.
    pub fn pick(&self) -> Result<C> {
        let members = self.shared.members.lock();
        if !RegistryState::for_len(members.len()).accepts_queries() {
            drop(members);
            return Err(self.not_connected(labels::OP_PICK));
        }

        let picked = self.shared.strategy.select(&members.connections).clone();
        drop(members);

        tracing::trace!(registry = %self.shared.config.name, "connection picked");
        counters::picked(&self.shared.config.name);
        Ok(picked)
    }

    /// Visit every registered connection in insertion order
    ///
    /// `visit` runs under the registry lock and must not call back into the
    /// registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before any visit if no connections are
    /// registered.
    pub fn for_each<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&C),
    {
        let members = self.shared.members.lock();
        if !RegistryState::for_len(members.len()).accepts_queries() {
            drop(members);
            return Err(self.not_connected(labels::OP_FOR_EACH));
        }

        for connection in &members.connections {
            visit(connection);
        }
        Ok(())
    }

    /// Lazy, restartable view over the registered connections
    ///
    /// Nothing is read until the view is iterated. Each iteration copies the
    /// membership once under the lock and then walks the copy.
    pub fn iter(&self) -> ConnectionsView<'_, C> {
        ConnectionsView::new(self)
    }

    /// Snapshot that fails on an empty registry
    pub(crate) fn checked_snapshot(&self, operation: &'static str) -> Result<Vec<C>> {
        let members = self.shared.members.lock();
        if !RegistryState::for_len(members.len()).accepts_queries() {
            drop(members);
            return Err(self.not_connected(operation));
        }
        Ok(members.connections.clone())
    }

    fn not_connected(&self, operation: &'static str) -> Error {
        tracing::debug!(
            registry = %self.shared.config.name,
            operation,
            "query rejected, registry has no connections"
        );
        counters::not_connected(&self.shared.config.name, operation);
        Error::NotConnected
    }
}

impl<C: Connection> Default for ConnectionRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for ConnectionRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C: Connection> fmt::Debug for ConnectionRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.len();
        f.debug_struct("ConnectionRegistry")
            .field("name", &self.shared.config.name)
            .field("len", &len)
            .field("state", &RegistryState::for_len(len))
            .finish()
    }
}
