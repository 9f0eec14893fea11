//! Runtime selection of a document store.

use super::{Document, DocumentStore, FileStore, Fields, HttpStore, StoreError};

/// The document store chosen from configuration: local files, or the remote
/// document service when a server URL is set.
#[derive(Clone, Debug)]
pub enum Backend {
    File(FileStore),
    Http(HttpStore),
}

impl Backend {
    /// Short description for logs and `config show`.
    pub fn describe(&self) -> String {
        match self {
            Backend::File(store) => format!("file ({})", store.data_dir().display()),
            Backend::Http(store) => format!("http ({})", store.base_url()),
        }
    }
}

impl From<FileStore> for Backend {
    fn from(store: FileStore) -> Self {
        Backend::File(store)
    }
}

impl From<HttpStore> for Backend {
    fn from(store: HttpStore) -> Self {
        Backend::Http(store)
    }
}

impl DocumentStore for Backend {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        match self {
            Backend::File(store) => store.list(collection).await,
            Backend::Http(store) => store.list(collection).await,
        }
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        match self {
            Backend::File(store) => store.get(collection, id).await,
            Backend::Http(store) => store.get(collection, id).await,
        }
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        match self {
            Backend::File(store) => store.create(collection, fields).await,
            Backend::Http(store) => store.create(collection, fields).await,
        }
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        match self {
            Backend::File(store) => store.set(collection, id, fields).await,
            Backend::Http(store) => store.set(collection, id, fields).await,
        }
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        match self {
            Backend::File(store) => store.update(collection, id, fields).await,
            Backend::Http(store) => store.update(collection, id, fields).await,
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        match self {
            Backend::File(store) => store.delete(collection, id).await,
            Backend::Http(store) => store.delete(collection, id).await,
        }
    }
}
