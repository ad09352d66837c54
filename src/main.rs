use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use s3web::config::ServeConfig;
use s3web::s3::{MemoryStore, ObjectStore, S3Client};
use s3web::web::{self, AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServeConfig::parse();
    init_logging(&config.log_level)?;

    if let Err(e) = config.validate() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(2);
    }

    let bucket = config.bucket_name();
    let store: Arc<dyn ObjectStore> = if config.memory {
        let store = MemoryStore::new();
        store.create_bucket(&bucket);
        Arc::new(store)
    } else {
        let provider = config.provider();
        info!(provider = provider.name(), "{}", provider.description());
        let provider_config = provider.build_config().await?;
        match S3Client::new(provider_config).await {
            Ok(client) => Arc::new(client),
            Err(e) => {
                eprintln!("{} Failed to initialize S3 client: {}", "Error:".red().bold(), e);
                eprintln!("Make sure you have valid AWS credentials configured.");
                std::process::exit(1);
            }
        }
    };

    // Print welcome message
    println!("{}", "=".repeat(60).cyan());
    println!("{}", "  s3web - S3 in the browser".bold().cyan());
    println!("{}", format!("  bucket: {bucket}").cyan());
    println!("{}", format!("  listening on http://{}", config.bind).cyan());
    println!("{}", "=".repeat(60).cyan());

    let state = AppState::new(store, bucket, config.listing_policy());
    let app = web::router(state, config.max_upload_bytes());

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    println!("Goodbye!");
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let level: tracing::Level = level.parse().context("Invalid log level")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}

async fn shutdown_signal() {
    // Ctrl-C
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
