use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod api;
mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod ordering;
mod permissions;
mod services;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = crate::config::config();
    tracing::info!("Starting Trip API in {:?} mode", config.environment);

    // Tables are created on demand; a missing database only degrades /health
    if let Err(e) = database::DatabaseManager::ensure_schema().await {
        tracing::warn!("Schema bootstrap skipped: {}", e);
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("TRIP_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Trip API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes
        .merge(auth_public_routes())
        // Token-gated account routes
        .merge(auth_routes())
        // Trip and day routes (reads public, writes ownership-gated)
        .merge(trip_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_public_routes() -> Router {
    use axum::routing::post;
    use handlers::auth;

    Router::new()
        .route("/auth/register", post(auth::register_post))
        .route("/auth/login", post(auth::login_post))
}

fn auth_routes() -> Router {
    use handlers::auth;

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami_get))
        .layer(axum::middleware::from_fn(
            middleware::auth::jwt_auth_middleware,
        ))
}

fn trip_routes() -> Router {
    use axum::routing::post;
    use handlers::{day, trip};

    Router::new()
        // Trip collection and record operations
        .route(
            "/api/trip",
            get(trip::collection_get).post(trip::collection_post),
        )
        .route(
            "/api/trip/:trip_id",
            get(trip::record_get)
                .put(trip::record_put)
                .patch(trip::record_patch)
                .delete(trip::record_delete),
        )
        // Ordered day operations nested under the trip
        .route(
            "/api/trip/:trip_id/day",
            get(day::collection_get).post(day::collection_post),
        )
        .route(
            "/api/trip/:trip_id/day/:day_id",
            get(day::record_get)
                .put(day::record_put)
                .patch(day::record_patch)
                .delete(day::record_delete),
        )
        .route("/api/trip/:trip_id/day/:day_id/move", post(day::record_move))
        // A Bearer token is optional here but must be valid when present
        .layer(axum::middleware::from_fn(
            middleware::auth::jwt_context_middleware,
        ))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Trip API",
            "version": version,
            "description": "Travel trip and daily itinerary CRUD API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "register": "POST /auth/register (public)",
                "login": "POST /auth/login (public - token acquisition)",
                "whoami": "GET /api/auth/whoami (token required)",
                "trips": "/api/trip[/:trip_id] (reads public, writes author-only)",
                "days": "/api/trip/:trip_id/day[/:day_id] (ordered; move via /move)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::DatabaseManager::health_check().await {
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
