//! Connection registry
//!
//! This module handles:
//! * Membership tracking (batch add, close-driven removal)
//! * Selection of one connection per request through a pluggable strategy
//! * Point-in-time snapshots and iteration
//! * Observable Empty/Populated state

mod manager;
mod state;
mod strategy;
mod view;

pub use manager::{ConnectionRegistry, RegistryBuilder, RegistryConfig};
pub use state::RegistryState;
pub use strategy::{RandomStrategy, SelectionStrategy};
pub use view::ConnectionsView;
