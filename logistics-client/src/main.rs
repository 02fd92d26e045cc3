use logistics_client::api::ApiClient;
use logistics_client::config::ClientConfig;
use logistics_client::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "fatal");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    info!(api = %config.base_url, timeout_secs = config.timeout_secs, "starting");

    let client = ApiClient::new(&config.api())?;
    let state = AppState::new(client, &config)?;

    // Load the first page of each list; failures show up in the views
    state.mount().await;

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("Route planner listening on http://{}", config.listen_addr);
    info!("  GET  /health                    - Health check");
    info!("  GET  /routes                    - Route search (HTML or JSON)");
    info!("  GET  /api/views/{{resource}}      - List view snapshot");
    info!("  POST /api/views/{{resource}}      - Apply a list view change");
    info!("  GET  /api/lookup/{{field}}?q=     - Typeahead candidates");

    axum::serve(listener, app).await?;
    Ok(())
}
