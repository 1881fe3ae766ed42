use anyhow::Context;
use clap::Args;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::database::{postgres, DatabaseManager, MemoryStore};
use crate::routes::{app, AppState};

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Bind address (overrides SERVER_HOST)")]
    pub host: Option<String>,

    #[arg(long, help = "Port (overrides TASKBOARD_PORT / PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Keep all data in memory instead of Postgres")]
    pub in_memory: bool,
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set in {:?} mode", config.environment);
    }

    tracing::info!("Starting Taskboard API in {:?} mode", config.environment);

    let repos = if args.in_memory {
        tracing::warn!("Using the in-memory store; data is lost on exit");
        MemoryStore::new().repositories()
    } else {
        tracing::info!("Connecting to {}", config.redacted_database_url());
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to the database")?;
        if config.database.run_migrations {
            DatabaseManager::migrate(&pool).await.context("failed to apply migrations")?;
        }
        postgres::repositories(pool)
    };

    let bind_addr = config.bind_addr();
    let router = app(AppState::new(config, repos));

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Taskboard API listening on http://{}", bind_addr);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
