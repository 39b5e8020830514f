//! connection-registry: a thread-safe registry of live database connections
//!
//! The registry tracks whatever connections the client has established,
//! hands one out per request through a pluggable [`SelectionStrategy`], and
//! forgets connections on its own as soon as they report that they closed.
//!
//! It never opens, closes or reconnects anything. Connections only need to
//! implement [`Connection`], which is a single close-notification hook.
//!
//! # Example
//!
//! ```
//! use connection_registry::{CloseHandler, CloseNotifier, Connection, ConnectionRegistry};
//! use std::sync::Arc;
//!
//! #[derive(Debug, Clone)]
//! struct Node {
//!     addr: &'static str,
//!     closed: Arc<CloseNotifier>,
//! }
//!
//! impl Connection for Node {
//!     fn on_closed(&self, handler: CloseHandler) {
//!         self.closed.subscribe(handler);
//!     }
//! }
//!
//! let a = Node { addr: "10.0.0.1:9042", closed: Arc::new(CloseNotifier::new()) };
//! let b = Node { addr: "10.0.0.2:9042", closed: Arc::new(CloseNotifier::new()) };
//!
//! let registry = ConnectionRegistry::new();
//! registry.add([a.clone(), b.clone()]);
//! assert!(registry.is_connected());
//!
//! a.closed.notify_closed();
//! let picked = registry.pick().unwrap();
//! assert_eq!(picked.addr, "10.0.0.2:9042");
//!
//! b.closed.notify_closed();
//! assert!(registry.pick().unwrap_err().is_not_connected());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod connection;
pub mod error;
pub mod metrics;
pub mod registry;

pub use connection::{CloseHandler, CloseNotifier, Connection};
pub use error::{Error, Result};
pub use registry::{
    ConnectionRegistry, ConnectionsView, RandomStrategy, RegistryBuilder, RegistryConfig,
    RegistryState, SelectionStrategy,
};
