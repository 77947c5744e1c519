// OmniVista API client modules
//
// Hand-written client for the controller's REST endpoints: session
// login/logout under `/rest-api/` and access-point inventory under
// `/api/wma/accessPoint/`, wrapped in the `{ "data": ... }` envelope.

pub mod access_points;
pub mod auth;
pub mod client;
pub mod models;

pub use client::OmniVistaClient;
