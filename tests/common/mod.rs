//! Shared fixtures for the integration tests

#![allow(dead_code)]

use connection_registry::{CloseHandler, CloseNotifier, Connection};
use std::sync::Arc;

/// Connection stand-in whose closure is driven by the test
#[derive(Debug, Clone)]
pub struct MockConnection {
    pub name: &'static str,
    pub closed: Arc<CloseNotifier>,
}

impl MockConnection {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            closed: Arc::new(CloseNotifier::new()),
        }
    }

    pub fn close(&self) {
        self.closed.notify_closed();
    }
}

impl PartialEq for MockConnection {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.closed, &other.closed)
    }
}

impl Connection for MockConnection {
    fn on_closed(&self, handler: CloseHandler) {
        self.closed.subscribe(handler);
    }
}

pub fn names(connections: &[MockConnection]) -> Vec<&'static str> {
    connections.iter().map(|c| c.name).collect()
}

/// Route registry logs to the test output (RUST_LOG=connection_registry=debug)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
