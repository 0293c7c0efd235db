use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use platescan::api::{create_router, AppState};
use platescan::config::Config;
use platescan::db::open_store;
use platescan::models::seed_records;
use platescan::ocr::OcrProvider;
use platescan::services::PlateService;

#[derive(Parser)]
#[command(name = "platescan")]
#[command(about = "License-plate lookup service with vision-model plate extraction")]
struct Args {
    /// Bind host (overrides PLATESCAN_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides PLATESCAN_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Start without inserting the built-in seed records
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "platescan=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.no_seed {
        config.store.seed = false;
    }

    tracing::info!("Initializing plate store...");
    let store = open_store(&config.store).await?;

    if config.store.seed {
        let inserted = PlateService::new(store.clone())
            .seed(seed_records())
            .await?;
        tracing::info!(inserted, "Seed records loaded");
    }

    tracing::info!("Initializing OCR provider: {}...", config.ocr.model);
    let ocr = OcrProvider::new(&config.ocr);
    if !ocr.is_available() {
        tracing::warn!("OCR unavailable - extraction endpoints will answer 503");
    }
    if config.extract.placeholder_on_miss {
        tracing::warn!(
            "EXTRACT_PLACEHOLDER_ON_MISS is set - unmatched extractions return a fabricated record"
        );
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, store, ocr);
    let app = create_router(state);

    tracing::info!("Platescan starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/health", addr);
    tracing::info!("  API docs:     http://{}/docs", addr);
    tracing::info!("  OpenAPI doc:  http://{}/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping server...");
}
