//! Wargaming public API integration (World of Warships `ships/stats`).

pub mod client;
pub mod dto;

pub use client::WargamingClient;
