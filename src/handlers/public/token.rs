// handlers/public/token.rs - POST /jwt and POST /logout

use axum::http::{header::SET_COOKIE, HeaderMap};
use axum::response::{IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{cookie, generate_jwt, Claims};
use crate::config;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub email: String,
}

/// POST /jwt - issue a signed credential for the submitted identity and
/// deliver it via the access-token cookie.
///
/// The identity is taken on trust; verifying it happens outside this
/// service. The only constraint enforced here is that it is non-empty.
pub async fn token_post(Json(body): Json<TokenRequest>) -> Result<impl IntoResponse, ApiError> {
    if body.email.trim().is_empty() {
        return Err(ApiError::bad_request("email is required"));
    }

    let security = &config::config().security;
    let claims = Claims::new(body.email, security.token_ttl_secs);
    let token = generate_jwt(&claims, &security.jwt_secret)?;

    let cookie = cookie::access_cookie(&token, security.token_ttl_secs, security.cookie_secure)
        .map_err(|e| {
            tracing::error!("failed to build access cookie: {}", e);
            ApiError::internal_server_error("Failed to issue access token")
        })?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    Ok((headers, Json(json!({ "success": true }))))
}

/// POST /logout - clear the access-token cookie. Always succeeds; there is
/// no server-side session state to discard.
pub async fn logout_post() -> Result<impl IntoResponse, ApiError> {
    let security = &config::config().security;

    let cookie = cookie::clear_access_cookie(security.cookie_secure).map_err(|e| {
        tracing::error!("failed to build clearing cookie: {}", e);
        ApiError::internal_server_error("Failed to clear access token")
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    Ok((headers, Json(json!({ "success": true }))))
}
