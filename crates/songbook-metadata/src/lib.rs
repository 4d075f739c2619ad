pub mod client;
pub mod config;
mod mapping;

pub use client::HttpMetadataProvider;
pub use config::MetadataConfig;
