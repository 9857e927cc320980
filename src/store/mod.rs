use std::fmt;

use async_trait::async_trait;

use serde_json::{Map, Value};

use thiserror::Error;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A flat key-value document as persisted in a collection
pub type Document = Map<String, Value>;

/// Wrapper for store results
pub type StoreResult<T> = Result<T, StoreError>;

/// Named document collections, one per record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Bookings,
    Contacts,
    Newsletter,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Bookings => "bookings",
            Collection::Contacts => "contacts",
            Collection::Newsletter => "newsletter",
        }
    }

    /// The document field that must be unique within this collection, if any
    pub fn unique_key(&self) -> Option<&'static str> {
        match self {
            Collection::Newsletter => Some("email"),
            Collection::Bookings | Collection::Contacts => None,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document store is unavailable")]
    Unavailable(#[from] sqlx::Error),

    #[error("Duplicate value for unique field `{field}` in {collection}")]
    Duplicate {
        collection: Collection,
        field: &'static str,
    },

    #[error("Stored document does not match its record shape")]
    Malformed(#[from] serde_json::Error),
}

/// Persistence gateway over a document store.
///
/// Documents handed back never carry internal storage identifiers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append a document to a collection
    async fn insert(&self, collection: Collection, document: Document) -> StoreResult<()>;

    /// Fetch up to `limit` documents of a collection in natural (insertion) order
    async fn find_all(&self, collection: Collection, limit: usize) -> StoreResult<Vec<Document>>;

    /// Fetch the first document whose fields contain every key/value of `filter`
    async fn find_one(&self, collection: Collection, filter: &Document)
        -> StoreResult<Option<Document>>;

    /// Release the underlying connection
    async fn close(&self);
}

/// Check whether `document` contains every key/value pair of `filter`
pub(crate) fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}
