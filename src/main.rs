use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use receitas_api::config::{self, AppConfig};
use receitas_api::database::{DatabaseManager, MemoryStore, PgStore};
use receitas_api::{is_development, server, AppState};

#[derive(Parser)]
#[command(name = "receitas-api")]
#[command(about = "Recipe sharing backend")]
#[command(version)]
struct Args {
    #[arg(long, help = "Address to bind (overrides SERVER_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides RECEITAS_API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Keep all data in process memory instead of PostgreSQL")]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("receitas_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config: AppConfig = config::config().clone().validate()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    tracing::info!("Starting Receitas API in {:?} mode", config.environment);

    let use_memory = args.in_memory || (config.database.url.is_none() && is_development!());
    let state = if use_memory {
        tracing::warn!("Using in-memory store; data is lost on exit");
        AppState::from_config(Arc::new(MemoryStore::new()), &config.security)?
    } else {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        AppState::from_config(Arc::new(PgStore::new(pool)), &config.security)?
    };

    let app = receitas_api::app(state, &config.security.cors_origins);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Receitas API listening on http://{}", bind_addr);
    server::serve(listener, app).await?;

    Ok(())
}
