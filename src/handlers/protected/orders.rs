// handlers/protected/orders.rs - identity-scoped order reads

use axum::extract::Query;
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::Value;

use crate::database::orders::OrderRepository;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    #[serde(default)]
    pub email: String,
}

/// GET /orders - list the caller's orders.
///
/// The decoded credential identity must match the requested email exactly;
/// a valid credential for a different identity is still rejected.
pub async fn orders_get(
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    if query.email != auth.email {
        return Err(ApiError::unauthorized("Forbidden access: email mismatch"));
    }

    let pool = DatabaseManager::pool().await?;
    let orders = OrderRepository::new(pool).list_by_email(&query.email).await?;

    Ok(Json(orders))
}
