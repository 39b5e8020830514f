//! Connection selection strategies

use rand::seq::SliceRandom;
use std::sync::Arc;

/// Policy choosing one connection from the registry's current members
///
/// The registry calls `select` while holding its lock, so implementations
/// must not block and must never call back into the registry.
pub trait SelectionStrategy<C>: Send + Sync {
    /// Choose one element of `connections`
    ///
    /// `connections` is never empty when called by the registry. An empty
    /// slice is a contract violation and implementations may panic.
    fn select<'a>(&self, connections: &'a [C]) -> &'a C;
}

/// Uniform random selection (the default strategy)
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

impl RandomStrategy {
    /// Create a random strategy
    pub fn new() -> Self {
        Self
    }
}

impl<C> SelectionStrategy<C> for RandomStrategy {
    fn select<'a>(&self, connections: &'a [C]) -> &'a C {
        connections
            .choose(&mut rand::thread_rng())
            .expect("selection strategy invoked with no connections")
    }
}

impl<C, S> SelectionStrategy<C> for Arc<S>
where
    S: SelectionStrategy<C> + ?Sized,
{
    fn select<'a>(&self, connections: &'a [C]) -> &'a C {
        (**self).select(connections)
    }
}
