//! Infrastructure configuration modules.

pub mod alerts;
pub mod logging;
pub mod scheduler;
pub mod settings;
pub mod telegram;
pub mod upstream;

pub use settings::Config;
