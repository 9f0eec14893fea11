//! HTTP client for the recipebox document service.
//!
//! Speaks the REST API served by `recipebox-server`:
//! - `GET    /collections/{collection}`
//! - `POST   /collections/{collection}`
//! - `GET    /collections/{collection}/{id}`
//! - `PUT    /collections/{collection}/{id}`
//! - `PATCH  /collections/{collection}/{id}`
//! - `DELETE /collections/{collection}/{id}`

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::{validate_name, Document, DocumentStore, Fields, StoreError};

/// Body returned by the service after creating a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Document store reached over HTTP.
#[derive(Clone, Debug)]
pub struct HttpStore {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, collection: &str) -> Result<String, StoreError> {
        validate_name(collection)?;
        Ok(format!("{}/collections/{}", self.base_url, collection))
    }

    fn doc_url(&self, collection: &str, id: &str) -> Result<String, StoreError> {
        validate_name(id)?;
        Ok(format!("{}/{}", self.collection_url(collection)?, id))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self.authorize(request).send().await?;
        tracing::debug!("{} -> {}", response.url(), response.status());
        Ok(response)
    }

    /// Checks whether the service answers its health endpoint.
    pub async fn check(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        matches!(
            self.client.get(&url).send().await,
            Ok(response) if response.status().is_success()
        )
    }
}

/// Turns a non-success response into a [`StoreError::Status`].
async fn error_for_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        message,
    })
}

impl DocumentStore for HttpStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let url = self.collection_url(collection)?;
        let response = self.send(self.client.get(&url)).await?;
        Ok(error_for_status(response).await?.json().await?)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let url = self.doc_url(collection, id)?;
        let response = self.send(self.client.get(&url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(error_for_status(response).await?.json().await?))
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let url = self.collection_url(collection)?;
        let response = self.send(self.client.post(&url).json(&fields)).await?;
        let created: CreatedResponse = error_for_status(response).await?.json().await?;
        Ok(created.id)
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let url = self.doc_url(collection, id)?;
        let response = self.send(self.client.put(&url).json(&fields)).await?;
        error_for_status(response).await?;
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let url = self.doc_url(collection, id)?;
        let response = self.send(self.client.patch(&url).json(&fields)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::not_found(collection, id));
        }
        error_for_status(response).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let url = self.doc_url(collection, id)?;
        let response = self.send(self.client.delete(&url)).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            _ => {
                error_for_status(response).await?;
                Ok(true)
            }
        }
    }
}
