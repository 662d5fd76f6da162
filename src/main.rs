use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use halloween_api::{build_router, origin::Origin, AppState, Config, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halloween_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Halloween API server...");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Environment: {}, Server: {}",
        config.environment,
        config.server_address()
    );

    let store = Store::open(&config.database_path).await?;

    log_endpoints(&config);

    let state = AppState::new(store, config.clone());
    let app = build_router(state);

    // Start server
    let addr: SocketAddr = config.server_address().parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Announce the public endpoints using the configured origin
///
/// Pages themselves are rewritten per request; this is only the operator's view.
fn log_endpoints(config: &Config) {
    let origin = Origin::from_config(config);
    let base = origin.base_url();

    tracing::info!("API base URL: {}", base);
    tracing::info!("  Ranking page:      {}/ranking", base);
    tracing::info!("  Photo gallery:     {}/photos", base);
    tracing::info!("  Cocktail ranking:  {}/cocteles/ranking", base);
    tracing::info!("  Users API:         {}", origin.users_endpoint());
    tracing::info!("  Images API:        {}", origin.images_endpoint());
    tracing::info!("  Save image:        {}/images/save", base);
    tracing::info!("  Leaderboard:       {}/cocteles/leaderboard", base);
    tracing::info!("  Database stats:    {}/database/stats", base);
    tracing::info!("Templates directory: {:?}", config.templates_dir);
}
