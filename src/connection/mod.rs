//! Connection capability contract
//!
//! This module handles:
//! * The close-notification hook every registered connection must expose
//! * A reusable notifier that connection implementations can embed

mod capability;
mod notifier;

pub use capability::{CloseHandler, Connection};
pub use notifier::CloseNotifier;
