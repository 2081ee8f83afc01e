use anyhow::Context;
use clap::Parser;
use leaderboard::config::{Args, Config};
use leaderboard::service::runtime::LeaderboardService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::try_from(&args)?;
    tracing::info!("Starting leaderboard on {}", config.bind);

    // 1. Leaderboard + background jobs (metadata aggregator, expiration sweeper):
    let service = LeaderboardService::start(&config);

    // 2. HTTP server:
    let app = service.router();
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("HTTP server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await?;

    // 3. Stop background jobs and drop the index:
    service.shutdown().await;

    Ok(())
}
