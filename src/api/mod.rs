//! Waffle REST API access used by the poller.

pub mod cards;
pub mod client;

pub use cards::{count_open_pull_requests, parse_cards, Card, CardMetadata};
pub use client::WaffleClient;
