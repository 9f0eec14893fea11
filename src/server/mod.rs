//! Recipebox document service.
//!
//! Serves any [`DocumentStore`] over HTTP so several clients can share one
//! set of recipes and meal plans.
//!
//! # Endpoints
//!
//! - `GET /health`: health check (no auth required)
//! - `GET /collections/{collection}`: every document in a collection
//! - `POST /collections/{collection}`: create a document with a generated id
//! - `GET /collections/{collection}/{id}`: one document, 404 if absent
//! - `PUT /collections/{collection}/{id}`: whole overwrite
//! - `PATCH /collections/{collection}/{id}`: top-level merge, 404 if absent
//! - `DELETE /collections/{collection}/{id}`: 204 if removed, 404 if absent
//!
//! When an API key is configured, collection routes require
//! `Authorization: Bearer <key>`.

mod error;
mod routes;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use recipebox_core::DocumentStore;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
}

/// Builds the service router over `store`.
pub fn router<S>(store: S, api_key: Option<String>) -> Router
where
    S: DocumentStore + Clone + 'static,
{
    let mut collections: Router = Router::new()
        .route(
            "/collections/{collection}",
            get(routes::list_documents::<S>).post(routes::create_document::<S>),
        )
        .route(
            "/collections/{collection}/{id}",
            get(routes::get_document::<S>)
                .put(routes::put_document::<S>)
                .patch(routes::patch_document::<S>)
                .delete(routes::delete_document::<S>),
        )
        .with_state(AppState { store });

    match api_key {
        Some(key) => {
            collections = collections.route_layer(middleware::from_fn_with_state(
                Arc::new(key),
                require_api_key,
            ));
        }
        None => tracing::warn!("No API key configured - collection routes are open"),
    }

    Router::new()
        .route("/health", get(health))
        .merge(collections)
        .layer(TraceLayer::new_for_http())
}

/// Auth error response
#[derive(Serialize)]
struct AuthError {
    error: &'static str,
    message: &'static str,
}

fn unauthorized(error: &'static str, message: &'static str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(AuthError { error, message })).into_response()
}

/// Rejects requests that do not carry the shared bearer key.
async fn require_api_key(State(key): State<Arc<String>>, request: Request, next: Next) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match auth_header {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(token) if token == key.as_str() => next.run(request).await,
            Some(_) => unauthorized("invalid_key", "Invalid API key"),
            None => unauthorized(
                "invalid_auth",
                "Authorization header must use Bearer scheme",
            ),
        },
        None => unauthorized("missing_auth", "Authorization header required"),
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
