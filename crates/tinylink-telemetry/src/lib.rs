//! Logging setup shared by tinylink binaries.

use clap::ValueEnum;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Deployment environment. Selects the log format and default verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    /// Human-readable output at `debug`.
    #[value(name = "local")]
    Local,
    /// JSON output at `debug`.
    #[value(name = "dev")]
    Dev,
    /// JSON output at `info`.
    #[value(name = "prod")]
    Prod,
}

impl Environment {
    /// The filter directive used when `RUST_LOG` is not set.
    pub fn default_directive(self) -> &'static str {
        match self {
            Environment::Local | Environment::Dev => "debug",
            Environment::Prod => "info",
        }
    }

    pub fn is_json(self) -> bool {
        !matches!(self, Environment::Local)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "local"),
            Environment::Dev => write!(f, "dev"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Builds the filter for `env`, letting `RUST_LOG` win when present.
pub fn env_filter(env: Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env.default_directive()))
}

/// Installs the global tracing subscriber. Call once, at startup.
pub fn init(env: Environment) -> Result<(), TelemetryError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(env))
        .with_target(true);

    if env.is_json() {
        builder.json().finish().try_init()?;
    } else {
        builder.finish().try_init()?;
    }

    Ok(())
}
