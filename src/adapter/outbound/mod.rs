//! Outbound adapters (driven side).

pub mod blizzard;
pub mod memory;
pub mod notifier;
pub mod sqlite;
