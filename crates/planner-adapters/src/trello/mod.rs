//! Trello REST API adapter.

pub mod client;
pub mod wire;

pub use client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, TrelloClient, classify_status};
