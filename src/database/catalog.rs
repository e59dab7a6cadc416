use serde_json::Value;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;

/// Read-only access to the service catalog collection. The catalog is
/// seeded out-of-band and never mutated through this API.
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List catalog entries whose title contains the search term,
    /// case-insensitive. An empty term matches the whole catalog.
    pub async fn search(&self, term: &str) -> Result<Vec<Value>, DatabaseError> {
        let pattern = format!("%{}%", term);

        let rows: Vec<(Value,)> = sqlx::query_as(
            "SELECT jsonb_set(doc, '{_id}', to_jsonb(id)) AS doc
             FROM services
             WHERE doc->>'title' ILIKE $1
             ORDER BY created_at",
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(doc,)| doc).collect())
    }

    /// Fetch the checkout projection (title, price, service_id, img) for a
    /// single catalog entry. The id is handed to the database as-is; a
    /// malformed value surfaces as a query error, not a not-found.
    pub async fn fetch_summary(&self, id: &str) -> Result<Option<Value>, DatabaseError> {
        let row: Option<(Value,)> = sqlx::query_as(
            "SELECT jsonb_build_object(
                '_id', id,
                'title', doc->'title',
                'price', doc->'price',
                'service_id', doc->'service_id',
                'img', doc->'img'
             ) AS doc
             FROM services
             WHERE id = $1::uuid",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(doc,)| doc))
    }
}
