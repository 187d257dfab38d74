use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use tinylink_core::Alias;
use tinylink_generator::DEFAULT_ALIAS_LENGTH;
use tinylink_telemetry::Environment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    #[value(name = "sqlite")]
    Sqlite,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorKind {
    /// Random alphanumeric aliases.
    #[value(name = "random")]
    Random,
    /// Sequential aliases, handy for local debugging.
    #[value(name = "seq")]
    Seq,
}

impl Display for GeneratorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorKind::Random => write!(f, "random"),
            GeneratorKind::Seq => write!(f, "seq"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tinylink", about = "URL shortener HTTP server", version)]
pub struct Cli {
    /// Deployment environment, selects log format and level
    #[arg(long, env = "TINYLINK_ENV", value_enum, default_value_t = Environment::Local)]
    pub env: Environment,

    /// Address the HTTP server listens on
    #[arg(long, env = "TINYLINK_LISTEN_ADDR", default_value = "127.0.0.1:8080")]
    pub listen_addr: SocketAddr,

    #[arg(long, env = "TINYLINK_STORAGE_BACKEND", value_enum, default_value_t = StorageBackend::Sqlite)]
    pub storage: StorageBackend,

    /// SQLite database file, created along with its directory if missing
    #[arg(long, env = "TINYLINK_STORAGE_PATH", default_value = "./storage/storage.db")]
    pub storage_path: PathBuf,

    /// Basic Auth user for the write endpoints
    #[arg(long, env = "TINYLINK_HTTP_USER")]
    pub http_user: String,

    /// Basic Auth password for the write endpoints
    #[arg(long, env = "TINYLINK_HTTP_PASSWORD", hide_env_values = true)]
    pub http_password: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "TINYLINK_TIMEOUT_SECS", default_value_t = 4)]
    pub timeout_secs: u64,

    /// Length of generated aliases
    #[arg(
        long,
        env = "TINYLINK_ALIAS_LENGTH",
        default_value_t = DEFAULT_ALIAS_LENGTH,
        value_parser = parse_alias_length
    )]
    pub alias_length: usize,

    #[arg(long, env = "TINYLINK_GENERATOR", value_enum, default_value_t = GeneratorKind::Random)]
    pub generator: GeneratorKind,

    /// Prefix for sequential aliases
    #[arg(
        long,
        env = "TINYLINK_GENERATOR_PREFIX",
        default_value = "tl",
        value_parser = parse_generator_prefix
    )]
    pub generator_prefix: String,

    /// Attempts per save when generated aliases collide
    #[arg(long, env = "TINYLINK_MAX_ATTEMPTS", default_value_t = 3)]
    pub max_attempts: usize,

    /// Base URL short links are served under, used in logs
    #[arg(long, env = "TINYLINK_PUBLIC_BASE_URL", default_value = "http://localhost:8080")]
    pub public_base_url: String,
}

fn parse_alias_length(value: &str) -> Result<usize, String> {
    let length: usize = value.parse().map_err(|e| format!("{e}"))?;
    if (1..=64).contains(&length) {
        Ok(length)
    } else {
        Err(format!("alias length must be between 1 and 64, got {length}"))
    }
}

/// The prefix must still form a valid alias once the six-digit counter is
/// appended, otherwise generated aliases could never be resolved.
fn parse_generator_prefix(value: &str) -> Result<String, String> {
    Alias::new(format!("{value}000000"))
        .map(|_| value.to_string())
        .map_err(|e| format!("invalid generator prefix '{value}': {e}"))
}
