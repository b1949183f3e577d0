//! Alert management.

pub mod service;

pub use service::{AlertRequest, AlertService};
