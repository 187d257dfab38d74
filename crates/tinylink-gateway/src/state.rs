use crate::auth::BasicCredentials;
use std::sync::Arc;
use std::time::Duration;
use tinylink_core::Shortener;
use typed_builder::TypedBuilder;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(4);

pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";

/// Shared by every handler. Cloning is cheap.
#[derive(Clone, TypedBuilder)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    #[builder(setter(transform = |credentials: BasicCredentials| Arc::new(credentials)))]
    credentials: Arc<BasicCredentials>,
    #[builder(default = DEFAULT_PUBLIC_BASE_URL.to_string(), setter(into))]
    base_url: String,
    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    request_timeout: Duration,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>, credentials: BasicCredentials) -> Self {
        Self::builder()
            .shortener(shortener)
            .credentials(credentials)
            .build()
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn credentials(&self) -> &BasicCredentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
