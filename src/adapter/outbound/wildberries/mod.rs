//! Wildberries supplies API integration.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::WildberriesClient;
pub use settings::ProviderConfig;
