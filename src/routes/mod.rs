use axum::{
    Router,
    http::{Method, Uri},
    routing::get,
};

use crate::{error::AppError, state::AppState};

pub mod account;
pub mod auth;
pub mod doc;
pub mod favorites;
pub mod health;
pub mod listings;

/// Routes mounted under `/api/v1`. Route groups that need an identity get the
/// bearer middleware bound to `state`.
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/account", account::router(state.clone()))
        .nest("/listings", listings::router(state.clone()))
        .nest("/favorites", favorites::router(state))
}

/// The full application without transport layers.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", create_api_router(state.clone()))
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
