use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use carbon_server::catalog::brazil_routes;
use carbon_server::config::{CarbonCreditConfig, EmissionFactors, ModeDisplayTable};
use carbon_server::engine::EmissionEngine;
use carbon_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Static tables; constructors reject structurally broken data, so a
    // bad edit to the built-ins fails here rather than mid-request.
    let factors = EmissionFactors::default();
    let credit = CarbonCreditConfig::default();
    let catalog = brazil_routes();
    println!(
        "Loaded {} routes across {} cities",
        catalog.len(),
        catalog.all_cities().len()
    );

    let engine = EmissionEngine::new(factors, credit);

    // Build app state
    let state = AppState::new(catalog, engine, ModeDisplayTable::brazilian());

    // Create router
    let app = create_router(state, "static");

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Carbon Emission Calculator listening on http://{addr}");
    println!();
    println!("Open http://{addr} in your browser for the web interface.");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health        - Health check");
    println!("  GET  /about         - About page");
    println!("  GET  /api/cities    - City autocomplete source");
    println!("  GET  /api/distance  - Route distance lookup");
    println!("  POST /calculate     - Run a calculation");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
