// navdash-api: Async Rust client for the navdash bookmark dashboard API

mod auth;
pub mod client;
pub mod error;
pub mod models;
mod navigation;
pub mod session;
mod system;
pub mod transport;

pub use client::{ApiClient, ApiResponse, RequestOptions};
pub use error::Error;
pub use models::{
    IconData, LastModified, Link, LoginCredentials, Navigation, RemoteConfig, SortIndexUpdate,
};
pub use session::Session;
pub use transport::{TlsMode, TransportConfig};
