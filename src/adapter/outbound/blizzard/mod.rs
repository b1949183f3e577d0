//! Blizzard Battle.net adapter.
//!
//! Implements the `CredentialExchange` and `PriceQuery` ports against the
//! Blizzard OAuth service and the WoW Token Game Data endpoint.

pub mod client;
pub mod dto;

pub use client::BlizzardClient;
