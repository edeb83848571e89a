use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use profile_api_rust::database;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = profile_api_rust::config::config();
    tracing::info!("Starting Profile API in {:?} mode", config.environment);

    tracing_subscriber::fmt::init();

    // Bootstrap the schema before accepting traffic
    let pool = database::manager::DatabaseManager::pool()
        .await
        .expect("database connection");
    database::migrations::run(&pool)
        .await
        .expect("schema bootstrap");

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("PROFILE_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Profile API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Profile and preference API
        .merge(profile_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn profile_routes() -> Router {
    use axum::routing::put;
    use profile_api_rust::handlers::{preferences, profiles};

    Router::new()
        // Owner-keyed upsert; the caller's owner-id header is the key
        .route("/profiles", put(profiles::profile_put))
        // Static route must be declared alongside the :id routes below
        .route("/profiles/page", get(profiles::profile_page))
        .route(
            "/profiles/:id",
            get(profiles::profile_get).delete(profiles::profile_delete),
        )
        .route(
            "/profiles/:id/preferences",
            get(preferences::preference_list).put(preferences::preference_put),
        )
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Profile API (Rust)",
            "version": version,
            "description": "Profile and preference CRUD API with geospatial radius search",
            "endpoints": {
                "home": "/ (public)",
                "profile": "GET|DELETE /profiles/:id, PUT /profiles (owner-id header required)",
                "page": "GET /profiles/page?longitude=&latitude=&distance=&offset= (public)",
                "preferences": "GET|PUT /profiles/:id/preferences",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::manager::DatabaseManager::health_check().await {
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
