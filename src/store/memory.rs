use std::collections::HashMap;

use async_trait::async_trait;

use tokio::sync::RwLock;

use super::{matches, Collection, Document, DocumentStore, StoreError, StoreResult};

/// Process-local document store, for tests and local runs without a database
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection
    pub async fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: Collection, document: Document) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        // Mirror the unique index of the database schema
        if let Some(field) = collection.unique_key() {
            if let Some(value) = document.get(field) {
                if documents.iter().any(|d| d.get(field) == Some(value)) {
                    return Err(StoreError::Duplicate { collection, field });
                }
            }
        }

        documents.push(document);
        Ok(())
    }

    async fn find_all(&self, collection: Collection, limit: usize) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let documents = collections
            .get(&collection)
            .map(|documents| documents.iter().take(limit).cloned().collect())
            .unwrap_or_default();
        Ok(documents)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Document,
    ) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;
        let found = collections
            .get(&collection)
            .and_then(|documents| documents.iter().find(|d| matches(d, filter)))
            .cloned();
        Ok(found)
    }

    async fn close(&self) {
        tracing::debug!("Closing in-memory document store");
    }
}
