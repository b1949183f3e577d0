//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`upstream`] - Scripted [`CredentialExchange`](crate::port::CredentialExchange)
//!   and [`PriceQuery`](crate::port::PriceQuery) fakes.
//! - [`dispatcher`] - `RecordingDispatcher` for delivery assertions.

pub mod dispatcher;
pub mod upstream;
