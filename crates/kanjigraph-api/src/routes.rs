use crate::{handlers, AppState};
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/v1/subgraph", get(handlers::subgraph))
        .route("/v1/lesson/{lesson}", get(handlers::lesson))
        .route("/v1/lineage", get(handlers::lineage))
        .route("/v1/query", get(handlers::query))
        .route("/v1/decompose/{kanji}", get(handlers::decompose))
        .with_state(state)
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
}
