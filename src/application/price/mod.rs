//! Upstream price access: token caching and price lookup.

pub mod fetcher;
pub mod token;

pub use fetcher::PriceFetcher;
pub use token::TokenCache;
