//! FoodLoop - Backend Server
//!
//! Connects food suppliers with surplus to nearby NGOs, care homes and food
//! banks. Suppliers carry a computed safety rating; new listings notify every
//! organization within its pickup radius.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod fixtures;
mod handlers;
mod routes;
mod services;
mod store;

pub use crate::config::Config;
use store::MemoryStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foodloop_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;
    config.validate()?;

    tracing::info!("Starting FoodLoop Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!(
        "Default notification radius: {} km",
        config.notifications.default_radius_km
    );

    let store = Arc::new(MemoryStore::new());
    if config.demo.seed_demo_data {
        fixtures::seed_demo_data(&store, chrono::Utc::now()).await;
        let counts = store.counts().await;
        tracing::info!(
            organizations = counts.organizations,
            suppliers = counts.suppliers,
            "Demo data loaded"
        );
    }

    // Create application state
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "FoodLoop API v1.0"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn seeded_app() -> Router {
        let store = Arc::new(MemoryStore::new());
        fixtures::seed_demo_data(&store, chrono::Utc::now()).await;
        create_app(AppState {
            store,
            config: Arc::new(Config::default()),
        })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(v) => Body::from(v.to_string()),
                None => Body::empty(),
            })
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_reports_seeded_counts() {
        let app = seeded_app().await;
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["records"]["organizations"], 3);
        assert_eq!(body["records"]["suppliers"], 3);
    }

    #[tokio::test]
    async fn test_posting_listing_notifies_nearby_organization() {
        let app = seeded_app().await;
        let start = chrono::Utc::now();
        let end = start + chrono::Duration::hours(2);

        let (status, created) = send(
            &app,
            "POST",
            "/api/food-listings",
            Some(json!({
                "title": "Vegetable Biryani",
                "quantity": "30 meals",
                "category": "cooked",
                "location": "321 Food Court, Delhi, India",
                "latitude": 28.6129,
                "longitude": 77.2295,
                "pickupTimeStart": start,
                "pickupTimeEnd": end,
                "freshnessScore": 90,
                "qualityScore": 88,
                "donorId": "user1"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "available");
        assert_eq!(created["notificationsSent"], 1);

        let org = fixtures::FOOD_FOR_ALL_ID;
        let (_, inbox) = send(&app, "GET", &format!("/api/notifications/{}", org), None).await;
        assert_eq!(inbox.as_array().map(Vec::len), Some(1));
        assert_eq!(inbox[0]["type"], "new_listing");
        assert_eq!(inbox[0]["title"], "New Food Available: Vegetable Biryani");

        let id = inbox[0]["id"].as_str().unwrap().to_string();
        let (status, read) = send(&app, "PATCH", &format!("/api/notifications/{}/read", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(read["isRead"], true);

        let (_, count) = send(&app, "GET", &format!("/api/notifications/{}/unread-count", org), None).await;
        assert_eq!(count["unread"], 0);

        let (_, supplier) = send(&app, "GET", "/api/suppliers/user/user1", None).await;
        assert_eq!(supplier["totalListings"], 46);
    }

    #[tokio::test]
    async fn test_validation_error_shape() {
        let app = seeded_app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/api/organizations",
            Some(json!({
                "name": "Nowhere Shelter",
                "type": "ngo",
                "email": "info@nowhere.org",
                "phone": "+1-555-0199",
                "address": "1 Unknown Road"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "address");
    }

    #[tokio::test]
    async fn test_missing_supplier_is_404() {
        let app = seeded_app().await;
        let uri = format!("/api/suppliers/{}/analysis", uuid::Uuid::new_v4());
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_supplier_analysis() {
        let app = seeded_app().await;
        let uri = format!("/api/suppliers/{}/analysis", fixtures::GOLDEN_PALACE_ID);
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["businessName"], "Golden Palace Restaurant");
        assert_eq!(body["performance"]["totalListings"], 45);
    }
}
