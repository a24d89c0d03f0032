pub mod engine;
pub mod error;
pub mod geocode;
pub mod hazard;
pub mod routing;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use shared::{RoutePoint, RouteQuery, RoutesResponse};

use crate::engine::RouteSafetyEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RouteSafetyEngine>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/routes", post(routes_handler))
        .route("/api/geocode", get(geocode_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn routes_handler(
    State(state): State<AppState>,
    Json(query): Json<RouteQuery>,
) -> Json<RoutesResponse> {
    let routes = state.engine.find_safe_routes(&query.start, &query.end).await;
    Json(RoutesResponse { routes })
}

#[derive(serde::Deserialize)]
struct GeocodeParams {
    name: String,
}

async fn geocode_handler(
    State(state): State<AppState>,
    Query(params): Query<GeocodeParams>,
) -> Json<RoutePoint> {
    Json(state.engine.geocoder().resolve(&params.name).await)
}
