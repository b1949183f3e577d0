//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  TokenCache, Fetcher,   │
//!     ┌──────────────┤  Scheduler, Service     ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌──────────┐           ┌─────────────┐              ┌────────────┐
//! │ Upstream │           │ AlertStore  │              │ Dispatcher │
//! │ Adapter  │           │   Adapter   │              │  Adapter   │
//! └──────────┘           └─────────────┘              └────────────┘
//! ```

pub mod outbound;

pub use outbound::notifier::{AlertNotification, Dispatcher, LogDispatcher};
pub use outbound::store::AlertStore;
pub use outbound::upstream::{CredentialExchange, IssuedToken, PriceQuery, RawPrice};
