//! File-backed document store.
//!
//! Storage layout:
//! ```text
//! <data_dir>/
//! ├── recipes/
//! │   ├── <id>.json
//! │   └── ...
//! └── mealPlans/
//!     ├── default.json
//!     └── 2026-W03.json
//! ```

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{
    merge_fields, new_document_id, validate_name, Document, DocumentStore, Fields, StoreError,
};

/// File extension for stored documents.
const DOC_EXTENSION: &str = "json";

/// Extension of the scratch file a write goes through before the rename.
const TEMP_EXTENSION: &str = "json.tmp";

/// Document store keeping one pretty-printed JSON file per document.
#[derive(Clone, Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf, StoreError> {
        validate_name(collection)?;
        Ok(self.data_dir.join(collection))
    }

    /// Full path of a document file.
    pub fn doc_path(&self, collection: &str, id: &str) -> Result<PathBuf, StoreError> {
        validate_name(id)?;
        Ok(self
            .collection_dir(collection)?
            .join(format!("{}.{}", id, DOC_EXTENSION)))
    }

    async fn read(&self, path: &Path) -> Result<Option<Fields>, StoreError> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(path, e)),
        }
    }

    async fn write(&self, collection: &str, id: &str, fields: &Fields) -> Result<(), StoreError> {
        let dir = self.collection_dir(collection)?;
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| io_error(&dir, e))?;

        let path = self.doc_path(collection, id)?;
        let bytes = serde_json::to_vec_pretty(fields)?;

        // Readers only ever see a complete file: write aside, then rename.
        let temp_path = path.with_extension(TEMP_EXTENSION);
        fs::write(&temp_path, bytes)
            .await
            .map_err(|e| io_error(&temp_path, e))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| io_error(&path, e))?;

        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl DocumentStore for FileStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let dir = self.collection_dir(collection)?;
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&dir, e)),
        };

        let mut docs = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(&dir, e))? {
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) != Some(DOC_EXTENSION) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if validate_name(id).is_err() {
                continue;
            }

            match self.read(&path).await {
                Ok(Some(fields)) => docs.push(Document::new(id, fields)),
                Ok(None) => {}
                Err(StoreError::Serialization(e)) => {
                    tracing::warn!("Skipping unreadable document {}: {}", path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(docs)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let path = self.doc_path(collection, id)?;
        Ok(self
            .read(&path)
            .await?
            .map(|fields| Document::new(id, fields)))
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = new_document_id();
        self.write(collection, &id, &fields).await?;
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.write(collection, id, &fields).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let path = self.doc_path(collection, id)?;
        let mut existing = self
            .read(&path)
            .await?
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        merge_fields(&mut existing, fields);
        self.write(collection, id, &existing).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let path = self.doc_path(collection, id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}
