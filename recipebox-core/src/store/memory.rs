//! In-process document store.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{merge_fields, new_document_id, Document, DocumentStore, Fields, StoreError};

type Collections = HashMap<String, BTreeMap<String, Fields>>;

/// Document store held in memory. Clones share the same data.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }
}

impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone())))
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = new_document_id();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        merge_fields(existing, fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .is_some_and(|docs| docs.remove(id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn fields(value: Value) -> Fields {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryStore::new();
        let id = store
            .create("recipes", fields(json!({"name": "Toast"})))
            .await
            .unwrap();

        let doc = store.get("recipes", &id).await.unwrap().unwrap();
        assert_eq!(doc.id, id);
        assert_eq!(doc.fields["name"], "Toast");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = MemoryStore::new();
        assert!(store.get("recipes", "nope").await.unwrap().is_none());
        assert!(store.list("recipes").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_overwrites_whole_document() {
        let store = MemoryStore::new();
        store
            .set("mealPlans", "default", fields(json!({"Monday": {}, "Tuesday": {}})))
            .await
            .unwrap();
        store
            .set("mealPlans", "default", fields(json!({"Friday": {}})))
            .await
            .unwrap();

        let doc = store.get("mealPlans", "default").await.unwrap().unwrap();
        assert_eq!(Value::Object(doc.fields), json!({"Friday": {}}));
    }

    #[tokio::test]
    async fn test_update_merges_and_requires_existing() {
        let store = MemoryStore::new();
        let id = store
            .create("recipes", fields(json!({"name": "a", "created": 5})))
            .await
            .unwrap();

        store
            .update("recipes", &id, fields(json!({"name": "b"})))
            .await
            .unwrap();
        let doc = store.get("recipes", &id).await.unwrap().unwrap();
        assert_eq!(Value::Object(doc.fields), json!({"name": "b", "created": 5}));

        let err = store
            .update("recipes", "missing", fields(json!({"name": "c"})))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let id = store.create("recipes", Fields::new()).await.unwrap();

        assert!(store.delete("recipes", &id).await.unwrap());
        assert!(!store.delete("recipes", &id).await.unwrap());
        assert_eq!(store.len("recipes").await, 0);
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.create("recipes", Fields::new()).await.unwrap();
        assert_eq!(other.len("recipes").await, 1);
    }
}
