// aploc-api: Async Rust client for the OmniVista access-point REST API

pub mod auth;
pub mod error;
pub mod omnivista;
pub mod transport;

pub use auth::Session;
pub use error::Error;
pub use omnivista::OmniVistaClient;
pub use omnivista::models;
pub use transport::{TlsMode, TransportConfig};
