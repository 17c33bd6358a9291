//! pulselog-api - HTTP API server for pulselog.

mod auth;
mod error;
mod handlers;
mod password;

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use governor::{Quota, RateLimiter};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use pulselog_core::defaults::{API_RATE_LIMIT_PERIOD_SECS, API_RATE_LIMIT_REQUESTS};
use pulselog_db::Database;
use pulselog_suggest::ExerciseSuggester;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically, which helps with
/// log correlation when chasing a failing search or suggestion call.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APP STATE
// =============================================================================

type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Application state shared across handlers.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) db: Database,
    pub(crate) suggester: Arc<ExerciseSuggester>,
    /// Rate limiter for the public `/api` surface (None disables it).
    rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

// =============================================================================
// RATE LIMITING MIDDLEWARE
// =============================================================================

async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            tracing::warn!(
                subsystem = "api",
                component = "rate_limit",
                "Rate limit exceeded"
            );
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "rate_limit_exceeded",
                    "error_description": "Too many requests. Please wait before retrying."
                })),
            ));
        }
    }
    Ok(next.run(request).await)
}

// =============================================================================
// HEALTH CHECK
// =============================================================================

async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "ok": true }))),
        Err(e) => {
            tracing::error!(
                subsystem = "api",
                component = "health",
                error = %e,
                "Health check failed"
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "ok": false, "error": "DB unavailable" })),
            )
        }
    }
}

// =============================================================================
// ROUTER
// =============================================================================

fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/items", get(handlers::items::list_items))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/healthz", get(healthz))
        // Workouts
        .route("/workouts/search", get(handlers::workouts::search))
        .route("/workouts/list", get(handlers::workouts::list))
        .route("/workouts/suggestions", get(handlers::workouts::suggestions))
        .route("/workouts", post(handlers::workouts::add_workout))
        // Users
        .route("/auth/register", post(handlers::users::register))
        .route("/auth/login", post(handlers::users::login))
        // Public API (rate-limited)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let db = Database::connect(&database_url).await?;
    let suggester = Arc::new(ExerciseSuggester::from_env());

    let quota = Quota::with_period(Duration::from_secs(API_RATE_LIMIT_PERIOD_SECS))
        .expect("Rate limit period must be non-zero")
        .allow_burst(NonZeroU32::new(API_RATE_LIMIT_REQUESTS).expect("Rate limit must be non-zero"));
    let rate_limiter = Some(Arc::new(RateLimiter::direct(quota)));

    let state = AppState {
        db,
        suggester,
        rate_limiter,
    };
    let app = build_router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
        .parse()?;
    info!(
        subsystem = "api",
        op = "startup",
        %addr,
        "pulselog API listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
