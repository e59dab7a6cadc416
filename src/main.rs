use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration; aborts here if a required secret is absent
    let config = crate::config::config();
    tracing::info!("Starting car-service API in {:?} mode", config.environment);

    // Best-effort schema bootstrap. The pool is created lazily per request,
    // so a database that is down at boot only degrades /health.
    if let Err(e) = database::DatabaseManager::ensure_schema().await {
        tracing::warn!("schema bootstrap skipped: {}", e);
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("car-service API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Token issuance and logout
        .merge(token_routes())
        // Catalog reads
        .merge(service_routes())
        // Order operations (list is guarded)
        .merge(order_routes())
        // Global middleware
        .layer(cors_layer());

    if config::config().api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn token_routes() -> Router {
    use axum::routing::post;
    use handlers::public::token;

    Router::new()
        .route("/jwt", post(token::token_post))
        .route("/logout", post(token::logout_post))
}

fn service_routes() -> Router {
    use handlers::public::services;

    Router::new()
        .route("/services", get(services::services_get))
        .route("/services/:id", get(services::service_get))
}

fn order_routes() -> Router {
    use axum::middleware::from_fn;
    use axum::routing::{patch, post};
    use handlers::{protected, public::orders};

    Router::new()
        .route("/orders", post(orders::order_post))
        .route(
            "/orders/:id",
            patch(orders::order_patch).delete(orders::order_delete),
        )
        // Listing is identity-scoped and sits behind the credential guard
        .merge(
            Router::new()
                .route("/orders", get(protected::orders::orders_get))
                .route_layer(from_fn(crate::middleware::jwt_auth_middleware)),
        )
}

/// Cookies are cross-site, so origins are enumerated and credentials allowed
fn cors_layer() -> tower_http::cors::CorsLayer {
    use axum::http::{header, HeaderValue, Method};

    let origins: Vec<HeaderValue> = config::config()
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    tower_http::cors::CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Car Service API",
            "version": version,
            "description": "Backend for a car-service ordering application",
            "endpoints": {
                "token": "POST /jwt, POST /logout (public - cookie issuance)",
                "services": "GET /services[?search=], GET /services/:id (public)",
                "orders": "POST /orders, PATCH /orders/:id, DELETE /orders/:id (public)",
                "my_orders": "GET /orders?email= (guarded - email must match credential)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
