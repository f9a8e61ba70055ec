use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState) -> Router {
    let app = Router::new()
        .route("/api/session", axum::routing::post(routes::api::create_session))
        .route("/api/session/{id}", axum::routing::get(routes::api::get_session))
        .route(
            "/api/session/{id}/guess",
            axum::routing::post(routes::api::post_guess),
        )
        .route(
            "/api/session/{id}/share",
            axum::routing::get(routes::api::get_share),
        )
        .route(
            "/api/municipalities",
            axum::routing::get(routes::api::get_municipalities),
        )
        .route("/api/health", axum::routing::get(routes::api::health));

    app.layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .fallback_service(ServeDir::new("static"))
        .with_state(state)
}
