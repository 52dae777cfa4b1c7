use clap::Parser;
use tracing_subscriber::EnvFilter;

use hobbees_api::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hobbees_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    // Initialize configuration (this loads the config singleton)
    let config = hobbees_api::config::config();
    tracing::info!("Starting Hobbees API in {:?} mode", config.environment);

    hobbees_api::cli::run(cli, config).await
}
