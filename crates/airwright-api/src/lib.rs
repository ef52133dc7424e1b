// airwright-api: Async Rust client for the Airbyte configuration API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

mod connections;
mod definitions;
mod destinations;
mod sources;
mod workspaces;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{BasicAuth, TransportConfig};
