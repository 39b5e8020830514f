//! Close-notification capability

/// One-shot callback invoked when a connection transitions to closed
pub type CloseHandler = Box<dyn FnOnce() + Send + 'static>;

/// A live connection that can be tracked by a [`ConnectionRegistry`]
///
/// The registry consumes nothing but the close hook. Implementations are
/// expected to be cheap handles (typically an `Arc` around the real
/// connection), since the registry hands out clones from `pick()` and
/// `snapshot()`.
///
/// # Contract
///
/// * Every handler passed to `on_closed` must be invoked at most once, when
///   the connection closes.
/// * Handlers registered by separate calls fire independently: closing the
///   connection once notifies every subscriber.
/// * Handlers may be invoked from any thread, and synchronously from within
///   `on_closed` if the connection is already closed.
///
/// [`CloseNotifier`](super::CloseNotifier) implements all of the above and
/// can be embedded directly.
///
/// [`ConnectionRegistry`]: crate::ConnectionRegistry
pub trait Connection: Clone + Send + Sync + 'static {
    /// Register `handler` to run once when this connection closes
    fn on_closed(&self, handler: CloseHandler);
}
