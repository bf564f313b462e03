pub mod client;

pub use client::{MarketClient, parse_markets};
