pub mod auth;
pub mod contacts;

use axum::{
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::session::require_session;
use auth::ServerState;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: public account pages plus the
/// session-protected contact pages.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout));

    let protected = Router::new()
        .route("/", get(contacts::index))
        .route("/add", get(contacts::add_form).post(contacts::add))
        .route("/edit/:index", get(contacts::edit_form).post(contacts::edit))
        .route("/delete/:index", get(contacts::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    public
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
