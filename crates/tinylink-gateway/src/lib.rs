//! HTTP gateway for the tinylink URL shortener.
//!
//! Exposes save, redirect and delete over a small REST surface. Writes are
//! gated by HTTP Basic Auth; every response body is a JSON
//! [`Envelope`][model::Envelope] except successful redirects.

pub mod app;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use auth::BasicCredentials;
pub use error::AppError;
pub use state::AppState;
