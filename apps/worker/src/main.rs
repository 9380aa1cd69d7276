use rotify_metrics_client::MetricsClient;
use rotify_spotify_client::SpotifyClient;
use rotify_worker::{orchestrator, token_store, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rotify_worker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let spotify = SpotifyClient::new(config.spotify())?;
    let metrics = match config.metrics() {
        Some(metrics_config) => Some(MetricsClient::new(metrics_config)?),
        None => {
            tracing::debug!("No metrics sink configured, emission disabled");
            None
        }
    };

    let credentials = token_store::load(config.tokens_path())?;
    tracing::info!(
        users = credentials.len(),
        environment = %config.environment(),
        "Starting playlist rotation run"
    );

    let summary = orchestrator::run_all(&spotify, metrics.as_ref(), &config, credentials).await;

    tracing::info!(
        dispatched = summary.dispatched,
        rotated = summary.rotated,
        skipped = summary.skipped,
        failed = summary.failed,
        "Rotation run completed"
    );

    Ok(())
}
