//! Document store access.
//!
//! Recipes and meal plans live in a document store: named collections of
//! JSON objects addressed by string ids. The repositories only need the
//! primitives of [`DocumentStore`]; they never rely on store-side queries,
//! indexes or transactions.
//!
//! Implementations:
//! - [`MemoryStore`]: in-process maps
//! - [`FileStore`]: one JSON file per document under a data directory
//! - [`HttpStore`]: client for the `recipebox-server` document service
//! - [`Backend`]: runtime choice between the file and HTTP stores

mod backend;
mod error;
mod file;
mod http;
mod memory;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::future::Future;

pub use backend::Backend;
pub use error::StoreError;
pub use file::FileStore;
pub use http::{CreatedResponse, HttpStore};
pub use memory::MemoryStore;

/// Document body: a JSON object of top-level fields.
pub type Fields = Map<String, Value>;

/// A stored document together with its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// CRUD primitives over collections of documents.
///
/// Every call is a single round trip. No operation spans more than one
/// document, and callers that read, modify and write a document back get
/// last-write-wins semantics.
pub trait DocumentStore: Send + Sync {
    /// All documents in a collection, in the store's enumeration order.
    fn list(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<Document>, StoreError>> + Send;

    /// A document by id, or `None` if it does not exist.
    fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// Stores a new document under a generated id and returns the id.
    fn create(
        &self,
        collection: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;

    /// Overwrites the whole document at `id`, creating it if absent.
    fn set(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Merges top-level fields into an existing document.
    ///
    /// Fails with [`StoreError::NotFound`] if the document does not exist.
    fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Removes a document. Returns whether it existed; deleting an absent
    /// document is not an error.
    fn delete(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// Generates an id for a new document.
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Checks that a collection name or document id is safe to use as a path
/// segment: ASCII letters, digits, `-` and `_` only.
pub fn validate_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}

/// Applies a top-level merge of `patch` onto `fields`.
pub(crate) fn merge_fields(fields: &mut Fields, patch: Fields) {
    for (key, value) in patch {
        fields.insert(key, value);
    }
}
