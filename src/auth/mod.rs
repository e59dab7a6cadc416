use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

pub mod cookie;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Email identity the credential was issued for.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(email: String, ttl_secs: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::seconds(ttl_secs as i64)).timestamp();

        Self {
            sub: email,
            iat: now.timestamp(),
            exp,
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}
