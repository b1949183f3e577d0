//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: alert storage,
//! the upstream price API and notification delivery.

pub mod notifier;
pub mod store;
pub mod upstream;
