// handlers/public/orders.rs - unguarded order writes

use axum::extract::Path;
use axum::response::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::database::orders::OrderRepository;
use crate::database::results::{DeleteResult, InsertResult, UpdateResult};
use crate::database::DatabaseManager;
use crate::error::ApiError;

/// POST /orders - insert a client-supplied order document as-is.
///
/// The email embedded in the document is trusted as submitted; ownership
/// is only enforced on the read path.
pub async fn order_post(Json(doc): Json<Value>) -> Result<Json<InsertResult>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let result = OrderRepository::new(pool).insert(&doc).await?;

    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// PATCH /orders/:id - overwrite the mutable status field
pub async fn order_patch(
    Path(id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<UpdateResult>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let result = OrderRepository::new(pool).set_status(&id, &body.status).await?;

    Ok(Json(result))
}

/// DELETE /orders/:id - delete one order
pub async fn order_delete(Path(id): Path<String>) -> Result<Json<DeleteResult>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let result = OrderRepository::new(pool).remove(&id).await?;

    Ok(Json(result))
}
