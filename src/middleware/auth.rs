use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::auth::{cookie, Claims};
use crate::config;
use crate::error::ApiError;

/// Authenticated identity extracted from the access-token cookie.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { email: claims.sub }
    }
}

/// Credential-verifying middleware for identity-scoped routes.
///
/// Every request is verified independently; there is no server-side
/// session state.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract the credential from the request cookie
    let token = cookie::extract_access_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("Missing access token cookie"))?;

    // Validate signature and expiry
    let claims = validate_jwt(&token, &config::config().security.jwt_secret)
        .map_err(ApiError::unauthorized)?;

    // Attach the decoded identity and let the handler run
    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Validate a credential against the server secret and extract its claims
fn validate_jwt(token: &str, secret: &str) -> Result<Claims, String> {
    if secret.is_empty() {
        return Err("JWT secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Invalid access token: {}", e))?;

    Ok(token_data.claims)
}
