use sibyl::{app, config::Config, AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sibyl=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!(
        "Starting Sibyl server on {}:{} for {}",
        config.host, config.port, config.asset_id
    );
    if let Some(seed) = config.demo_seed {
        info!("Demo data seeded with {}", seed);
    }

    let addr = config.bind_address();
    let state = AppState::from_config(config);
    let app = app(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Sibyl server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
