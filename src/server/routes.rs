//! Collection and document handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use recipebox_core::store::{validate_name, CreatedResponse};
use recipebox_core::{Document, DocumentStore, Fields, StoreError};

use super::{error::ApiError, AppState};

/// Rejects names that are not safe path segments, whatever the backing store.
fn names(collection: &str, id: Option<&str>) -> Result<(), StoreError> {
    validate_name(collection)?;
    id.map_or(Ok(()), validate_name)
}

fn body(payload: Result<Json<Fields>, JsonRejection>) -> Result<Fields, ApiError> {
    payload
        .map(|Json(fields)| fields)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

pub async fn list_documents<S: DocumentStore + Clone + 'static>(
    State(state): State<AppState<S>>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<Document>>, ApiError> {
    names(&collection, None)?;
    Ok(Json(state.store.list(&collection).await?))
}

pub async fn create_document<S: DocumentStore + Clone + 'static>(
    State(state): State<AppState<S>>,
    Path(collection): Path<String>,
    payload: Result<Json<Fields>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    names(&collection, None)?;
    let fields = body(payload)?;
    let id = state.store.create(&collection, fields).await?;
    tracing::debug!("Created {}/{}", collection, id);
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn get_document<S: DocumentStore + Clone + 'static>(
    State(state): State<AppState<S>>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Document>, ApiError> {
    names(&collection, Some(&id))?;
    state
        .store
        .get(&collection, &id)
        .await?
        .map(Json)
        .ok_or_else(|| StoreError::not_found(&collection, &id).into())
}

/// Whole overwrite; creates the document if it is absent.
pub async fn put_document<S: DocumentStore + Clone + 'static>(
    State(state): State<AppState<S>>,
    Path((collection, id)): Path<(String, String)>,
    payload: Result<Json<Fields>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    names(&collection, Some(&id))?;
    let fields = body(payload)?;
    state.store.set(&collection, &id, fields).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Top-level merge into an existing document.
pub async fn patch_document<S: DocumentStore + Clone + 'static>(
    State(state): State<AppState<S>>,
    Path((collection, id)): Path<(String, String)>,
    payload: Result<Json<Fields>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    names(&collection, Some(&id))?;
    let fields = body(payload)?;
    state.store.update(&collection, &id, fields).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_document<S: DocumentStore + Clone + 'static>(
    State(state): State<AppState<S>>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    names(&collection, Some(&id))?;
    if state.store.delete(&collection, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StoreError::not_found(&collection, &id).into())
    }
}
