//! Price quotes and currency conversion.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::id::Region;

/// Copper pieces per gold piece.
pub const COPPER_PER_GOLD: u64 = 10_000;

/// Convert an upstream copper amount to whole gold, rounding down.
#[must_use]
pub const fn copper_to_gold(copper: u64) -> u64 {
    copper / COPPER_PER_GOLD
}

/// Format a gold amount with `,` thousands separators.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Current price for one region, in whole gold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub region: Region,
    pub price: u64,
    pub last_updated: DateTime<Utc>,
}
