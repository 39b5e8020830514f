//! Lazy sequence view over a registry

use super::manager::ConnectionRegistry;
use crate::connection::Connection;
use crate::metrics::labels;
use crate::Result;
use std::fmt;

/// Restartable view over the connections of a [`ConnectionRegistry`]
///
/// Created by [`ConnectionRegistry::iter`]. The view holds no data of its
/// own: every call that iterates copies the current membership once under
/// the registry lock and then works on that copy, so the registry is never
/// locked per element and closures passed to `map`/`filter` may freely call
/// back into the registry.
///
/// Every iterating call fails with [`Error::NotConnected`] while the
/// registry is empty.
///
/// [`Error::NotConnected`]: crate::Error::NotConnected
pub struct ConnectionsView<'a, C> {
    registry: &'a ConnectionRegistry<C>,
}

impl<'a, C: Connection> ConnectionsView<'a, C> {
    pub(crate) fn new(registry: &'a ConnectionRegistry<C>) -> Self {
        Self { registry }
    }

    /// Start a new iteration over the current membership
    pub fn iter(&self) -> Result<std::vec::IntoIter<C>> {
        self.registry
            .checked_snapshot(labels::OP_ITER)
            .map(Vec::into_iter)
    }

    /// Apply `f` to every connection, in insertion order
    pub fn map<B, F>(&self, f: F) -> Result<Vec<B>>
    where
        F: FnMut(C) -> B,
    {
        Ok(self.iter()?.map(f).collect())
    }

    /// Keep the connections matching `predicate`, in insertion order
    pub fn filter<P>(&self, predicate: P) -> Result<Vec<C>>
    where
        P: FnMut(&C) -> bool,
    {
        Ok(self.iter()?.filter(predicate).collect())
    }

    /// Collect the current membership
    pub fn collect_vec(&self) -> Result<Vec<C>> {
        self.iter().map(|connections| connections.collect())
    }
}

impl<C> Clone for ConnectionsView<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for ConnectionsView<'_, C> {}

impl<C: Connection> fmt::Debug for ConnectionsView<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionsView")
            .field("registry", self.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::connection::{CloseHandler, CloseNotifier, Connection};
    use crate::{ConnectionRegistry, Error};
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    struct Indexed {
        index: usize,
        closed: Arc<CloseNotifier>,
    }

    impl Connection for Indexed {
        fn on_closed(&self, handler: CloseHandler) {
            self.closed.subscribe(handler);
        }
    }

    fn populated(count: usize) -> (ConnectionRegistry<Indexed>, Vec<Indexed>) {
        let connections: Vec<Indexed> = (0..count)
            .map(|index| Indexed {
                index,
                closed: Arc::new(CloseNotifier::new()),
            })
            .collect();
        let registry = ConnectionRegistry::new();
        registry.add(connections.clone());
        (registry, connections)
    }

    #[test]
    fn test_view_can_be_mapped() {
        let (registry, _) = populated(3);
        let indexes = registry.iter().map(|c| c.index).unwrap();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn test_view_can_be_filtered() {
        let (registry, _) = populated(3);
        let even: Vec<usize> = registry
            .iter()
            .filter(|c| c.index % 2 == 0)
            .unwrap()
            .into_iter()
            .map(|c| c.index)
            .collect();
        assert_eq!(even, vec![0, 2]);
    }

    #[test]
    fn test_view_matches_snapshot_order() {
        let (registry, connections) = populated(4);
        connections[1].closed.notify_closed();

        let from_view: Vec<usize> = registry.iter().iter().unwrap().map(|c| c.index).collect();
        let from_snapshot: Vec<usize> = registry.snapshot().into_iter().map(|c| c.index).collect();
        assert_eq!(from_view, from_snapshot);
        assert_eq!(from_view, vec![0, 2, 3]);
    }

    #[test]
    fn test_view_is_restartable_and_lazy() {
        let (registry, connections) = populated(2);
        let view = registry.iter();

        assert_eq!(view.collect_vec().unwrap().len(), 2);
        assert_eq!(view.collect_vec().unwrap().len(), 2);

        // Each iteration reads the membership at that moment
        connections[0].closed.notify_closed();
        assert_eq!(view.map(|c| c.index).unwrap(), vec![1]);
    }

    #[test]
    fn test_view_on_empty_registry_fails() {
        let registry = ConnectionRegistry::<Indexed>::new();
        let view = registry.iter();

        assert_eq!(view.iter().unwrap_err(), Error::NotConnected);
        assert_eq!(view.filter(|_| true).unwrap_err(), Error::NotConnected);
        assert_eq!(view.map(|c| c.index).unwrap_err(), Error::NotConnected);
    }

    #[test]
    fn test_view_closures_may_reenter_registry() {
        let (registry, _) = populated(2);
        let sizes = registry.iter().map(|_| registry.len()).unwrap();
        assert_eq!(sizes, vec![2, 2]);
    }
}
