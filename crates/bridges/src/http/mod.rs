pub mod client;
pub mod config;

pub use client::HttpBridge;
pub use config::BridgeConfig;
