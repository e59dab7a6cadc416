use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL, filled from DATABASE_URL at startup.
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Signing secret, filled from JWT_SECRET at startup.
    pub jwt_secret: String,
    /// Credential lifetime in seconds. Fixed at one hour unless overridden.
    pub token_ttl_secs: u64,
    /// Whether issued cookies carry the Secure attribute. Off in
    /// development so plain-HTTP clients can authenticate.
    pub cookie_secure: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
        .with_required_secrets()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_TOKEN_TTL_SECS") {
            self.security.token_ttl_secs = v.parse().unwrap_or(self.security.token_ttl_secs);
        }
        if let Ok(v) = env::var("SECURITY_COOKIE_SECURE") {
            self.security.cookie_secure = v.parse().unwrap_or(self.security.cookie_secure);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    /// Required secrets. The process aborts at startup when one is absent
    /// or DATABASE_URL does not parse, rather than failing on first use.
    fn with_required_secrets(mut self) -> Self {
        self.database.url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| panic!("DATABASE_URL is required"));
        if url::Url::parse(&self.database.url).is_err() {
            panic!("DATABASE_URL is not a valid connection URL");
        }

        self.security.jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| panic!("JWT_SECRET is required"));
        if self.security.jwt_secret.is_empty() {
            panic!("JWT_SECRET must not be empty");
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                token_ttl_secs: 3600,
                cookie_secure: false,
                cors_origins: vec![
                    "http://localhost:5173".to_string(),
                    "http://localhost:3000".to_string(),
                ],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                token_ttl_secs: 3600,
                cookie_secure: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                enable_request_logging: false,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                token_ttl_secs: 3600,
                cookie_secure: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
