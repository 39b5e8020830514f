//! Close notification fan-out

use super::capability::CloseHandler;
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;

enum NotifierState {
    /// Connection still open, handlers waiting
    Open(Vec<CloseHandler>),
    /// Connection closed, every handler already fired
    Closed,
}

/// One-shot close event with any number of subscribers
///
/// Embed this in a connection type to satisfy the [`Connection`] contract:
/// forward `on_closed` to [`subscribe`](Self::subscribe) and call
/// [`notify_closed`](Self::notify_closed) when the transport goes away.
///
/// Handlers always run outside the notifier's lock, so a handler may
/// subscribe again or query the notifier without deadlocking.
///
/// [`Connection`]: super::Connection
pub struct CloseNotifier {
    state: Mutex<NotifierState>,
}

impl CloseNotifier {
    /// Create a notifier for an open connection
    pub fn new() -> Self {
        Self {
            state: Mutex::new(NotifierState::Open(Vec::new())),
        }
    }

    /// Register a handler
    ///
    /// If the connection has already closed the handler runs immediately on
    /// the calling thread.
    pub fn subscribe(&self, handler: CloseHandler) {
        {
            let mut state = self.state.lock();
            if let NotifierState::Open(handlers) = &mut *state {
                handlers.push(handler);
                return;
            }
        }
        handler();
    }

    /// Mark the connection closed and fire every pending handler
    ///
    /// Returns `true` for the call that performed the transition. Later calls
    /// are no-ops and return `false`.
    pub fn notify_closed(&self) -> bool {
        let previous = std::mem::replace(&mut *self.state.lock(), NotifierState::Closed);
        match previous {
            NotifierState::Open(handlers) => {
                tracing::trace!(subscribers = handlers.len(), "connection closed");
                for handler in handlers {
                    handler();
                }
                true
            }
            NotifierState::Closed => false,
        }
    }

    /// Check whether the close event has fired
    pub fn is_closed(&self) -> bool {
        matches!(*self.state.lock(), NotifierState::Closed)
    }

    /// Number of handlers still waiting for the close event
    pub fn subscriber_count(&self) -> usize {
        match &*self.state.lock() {
            NotifierState::Open(handlers) => handlers.len(),
            NotifierState::Closed => 0,
        }
    }

    /// Fire the close event once `signal` completes
    ///
    /// Spawns a task on the current tokio runtime that awaits `signal` (a
    /// reader task finishing, a shutdown channel, ...) and then calls
    /// [`notify_closed`](Self::notify_closed). Aborting the returned handle
    /// cancels the watch without closing.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn notify_when<F>(self: &Arc<Self>, signal: F) -> JoinHandle<()>
    where
        F: Future + Send + 'static,
    {
        let notifier = Arc::clone(self);
        tokio::spawn(async move {
            signal.await;
            notifier.notify_closed();
        })
    }
}

impl Default for CloseNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CloseNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseNotifier")
            .field("closed", &self.is_closed())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
