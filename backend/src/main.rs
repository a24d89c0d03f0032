use std::{net::SocketAddr, sync::Arc};

use backend::{AppState, create_router, engine::RouteSafetyEngine, hazard::HazardClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let hazard = HazardClient::from_env();
    match &hazard {
        Some(_) => tracing::info!("hazard backend enabled"),
        None => tracing::info!("hazard backend not configured, using deterministic generation"),
    }

    let state = AppState {
        engine: Arc::new(RouteSafetyEngine::new(hazard)),
    };
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        .parse()
        .expect("valid socket address");
    tracing::info!("starting backend on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}
