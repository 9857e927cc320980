use serde_json::Value;

use crate::domain::EmailAddress;
use crate::model::{Record, Subscription};
use crate::store::{Document, DocumentStore, StoreError, StoreResult};

/// Typed access to record collections on top of a document store
pub struct RecordRepo;

impl RecordRepo {
    #[tracing::instrument(name = "Insert record", skip_all, fields(collection = %R::COLLECTION))]
    pub async fn insert<R: Record>(store: &dyn DocumentStore, record: &R) -> StoreResult<()> {
        let document = to_document(record)?;
        store.insert(R::COLLECTION, document).await
    }

    #[tracing::instrument(name = "Fetch all records", skip(store), fields(collection = %R::COLLECTION))]
    pub async fn fetch_all<R: Record>(
        store: &dyn DocumentStore,
        limit: usize,
    ) -> StoreResult<Vec<R>> {
        store
            .find_all(R::COLLECTION, limit)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }
}

/// Newsletter-specific lookups
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    #[tracing::instrument(name = "Fetch subscription by email", skip(store))]
    pub async fn fetch_by_email(
        store: &dyn DocumentStore,
        email: &EmailAddress,
    ) -> StoreResult<Option<Subscription>> {
        let mut filter = Document::new();
        filter.insert("email".into(), Value::String(email.to_string()));

        store
            .find_one(Subscription::COLLECTION, &filter)
            .await?
            .map(from_document)
            .transpose()
    }
}

fn to_document<R: Record>(record: &R) -> StoreResult<Document> {
    match serde_json::to_value(record)? {
        Value::Object(document) => Ok(document),
        _ => Err(StoreError::Malformed(serde::ser::Error::custom(
            "Record did not serialize to an object",
        ))),
    }
}

fn from_document<R: Record>(document: Document) -> StoreResult<R> {
    serde_json::from_value(Value::Object(document)).map_err(StoreError::Malformed)
}
