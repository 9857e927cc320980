use async_trait::async_trait;

use serde_json::Value;

use sqlx::types::Json;
use sqlx::PgPool;

use super::{Collection, Document, DocumentStore, StoreError, StoreResult};

/// Document store backed by a single PostgreSQL `documents` table
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the bundled schema migrations
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    fn map_insert_error(collection: Collection, e: sqlx::Error) -> StoreError {
        if let (sqlx::Error::Database(db), Some(field)) = (&e, collection.unique_key()) {
            if db.is_unique_violation() {
                return StoreError::Duplicate { collection, field };
            }
        }
        StoreError::Unavailable(e)
    }
}

fn into_document(body: Json<Value>) -> StoreResult<Document> {
    serde_json::from_value(body.0).map_err(StoreError::Malformed)
}

#[async_trait]
impl DocumentStore for PgStore {
    #[tracing::instrument(name = "Insert document", skip(self, document))]
    async fn insert(&self, collection: Collection, document: Document) -> StoreResult<()> {
        sqlx::query("insert into documents(collection, body) values ($1, $2)")
            .bind(collection.as_str())
            .bind(Json(Value::Object(document)))
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_insert_error(collection, e))?;
        Ok(())
    }

    #[tracing::instrument(name = "Fetch all documents", skip(self))]
    async fn find_all(&self, collection: Collection, limit: usize) -> StoreResult<Vec<Document>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<(Json<Value>,)> =
            sqlx::query_as("select body from documents where collection=$1 order by seq limit $2")
                .bind(collection.as_str())
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(|(body,)| into_document(body)).collect()
    }

    #[tracing::instrument(name = "Fetch one document", skip(self))]
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Document,
    ) -> StoreResult<Option<Document>> {
        let row: Option<(Json<Value>,)> = sqlx::query_as(
            "select body from documents where collection=$1 and body @> $2 order by seq limit 1",
        )
        .bind(collection.as_str())
        .bind(Json(Value::Object(filter.clone())))
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(body,)| into_document(body)).transpose()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
