//! Exchange-agnostic domain types: alerts, identifiers, price quotes.
//!
//! Nothing in here performs I/O. Ports and adapters build on these types.

pub mod alert;
pub mod error;
pub mod id;
pub mod price;

pub use alert::{Alert, Direction, NewAlert};
pub use id::{AlertId, DestinationId, Region, SubscriberId};
pub use price::{copper_to_gold, group_thousands, PriceQuote};
