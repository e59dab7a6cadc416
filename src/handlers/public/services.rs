// handlers/public/services.rs - service catalog reads

use axum::extract::{Path, Query};
use axum::response::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::database::catalog::CatalogRepository;
use crate::database::DatabaseManager;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

/// GET /services - list catalog entries matching the optional search term
pub async fn services_get(Query(query): Query<SearchQuery>) -> Result<Json<Vec<Value>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let services = CatalogRepository::new(pool).search(&query.search).await?;

    Ok(Json(services))
}

/// GET /services/:id - fetch the checkout projection for one entry.
/// A missing entry yields a JSON null body, the raw fetch result.
pub async fn service_get(Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let service = CatalogRepository::new(pool).fetch_summary(&id).await?;

    Ok(Json(service.unwrap_or(Value::Null)))
}
