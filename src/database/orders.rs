use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::results::{DeleteResult, InsertResult, UpdateResult};

/// Access to the orders collection. Orders are arbitrary client-supplied
/// documents; only the generated id and the mutable status field are
/// touched server-side.
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order document as-is and return the generated id.
    pub async fn insert(&self, doc: &Value) -> Result<InsertResult, DatabaseError> {
        let (id,): (Uuid,) = sqlx::query_as("INSERT INTO orders (doc) VALUES ($1) RETURNING id")
            .bind(doc)
            .fetch_one(&self.pool)
            .await?;

        Ok(InsertResult {
            acknowledged: true,
            inserted_id: id,
        })
    }

    /// List orders whose email field equals the given address.
    pub async fn list_by_email(&self, email: &str) -> Result<Vec<Value>, DatabaseError> {
        let rows: Vec<(Value,)> = sqlx::query_as(
            "SELECT jsonb_set(doc, '{_id}', to_jsonb(id)) AS doc
             FROM orders
             WHERE doc->>'email' = $1
             ORDER BY created_at",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(doc,)| doc).collect())
    }

    /// Overwrite the mutable status field of one order. The id is handed
    /// to the database as-is; a malformed value surfaces as a query error.
    pub async fn set_status(&self, id: &str, status: &str) -> Result<UpdateResult, DatabaseError> {
        let result = sqlx::query(
            "UPDATE orders
             SET doc = jsonb_set(doc, '{status}', to_jsonb($2::text))
             WHERE id = $1::uuid",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        let affected = result.rows_affected();
        Ok(UpdateResult {
            acknowledged: true,
            matched_count: affected,
            modified_count: affected,
        })
    }

    /// Delete one order by id.
    pub async fn remove(&self, id: &str) -> Result<DeleteResult, DatabaseError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1::uuid")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count: result.rows_affected(),
        })
    }
}
