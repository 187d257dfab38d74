mod cli;

use crate::cli::{Cli, GeneratorKind, StorageBackend};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tinylink_core::{Repository, Shortener};
use tinylink_gateway::{App, AppState, BasicCredentials};
use tinylink_generator::{RandomGenerator, SeqGenerator};
use tinylink_shortener::{ShortenerService, ShortenerSettings};
use tinylink_storage::{InMemoryRepository, SqliteRepository};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing .env file is fine
    dotenvy::dotenv().ok();

    let config = Cli::parse();
    tinylink_telemetry::init(config.env)?;

    info!(
        env = %config.env,
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        generator = %config.generator,
        "starting tinylink http server"
    );

    let shortener = match config.storage {
        StorageBackend::InMemory => build_shortener(InMemoryRepository::new(), &config),
        StorageBackend::Sqlite => {
            let repository = SqliteRepository::connect(&config.storage_path)
                .await
                .with_context(|| {
                    format!("failed to init storage at {}", config.storage_path.display())
                })?;
            build_shortener(repository, &config)
        }
    };

    let state = AppState::builder()
        .shortener(shortener)
        .credentials(BasicCredentials::new(
            config.http_user.clone(),
            config.http_password.clone(),
        ))
        .base_url(config.public_base_url.clone())
        .request_timeout(Duration::from_secs(config.timeout_secs))
        .build();
    let app = App::router(state);

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(addr = %listener.local_addr()?, "server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

fn build_shortener<R: Repository>(repository: R, config: &Cli) -> Arc<dyn Shortener> {
    let settings = ShortenerSettings::builder()
        .max_attempts(config.max_attempts)
        .build();

    match config.generator {
        GeneratorKind::Random => Arc::new(ShortenerService::with_settings(
            repository,
            RandomGenerator::new(config.alias_length),
            settings,
        )),
        GeneratorKind::Seq => Arc::new(ShortenerService::with_settings(
            repository,
            SeqGenerator::with_prefix(config.generator_prefix.clone()),
            settings,
        )),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, draining connections");
}
