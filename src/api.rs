use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Json, State},
    http::HeaderMap,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::persistence::{log_batch_to_database, BatchContext};
use crate::thresholds::{ThresholdProfile, Thresholds};
use crate::{screen_request, ScreenRequest, ScreenResponse};

/// Build the HTTP router. Database logging is enabled when a pool is given.
pub fn router(pool: Option<PgPool>) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/screen", post(screen_handler))
        .route("/api/profiles", get(profiles_handler))
        .route("/api/version", get(version_handler))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(pool)
}

async fn serve_index() -> impl IntoResponse {
    info!("Serving index page");

    // Inject git revision info into HTML
    let html = include_str!("../static/index.html");
    let html_with_version = html
        .replace("{{GIT_HASH}}", env!("GIT_HASH"))
        .replace("{{GIT_DATE}}", env!("GIT_DATE"));

    Html(html_with_version)
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: &'static str,
    git_hash: &'static str,
    git_date: &'static str,
}

async fn version_handler() -> Json<VersionInfo> {
    Json(VersionInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("GIT_HASH"),
        git_date: env!("GIT_DATE"),
    })
}

#[derive(Debug, Serialize)]
struct ProfileInfo {
    name: &'static str,
    thresholds: &'static Thresholds,
}

async fn profiles_handler() -> Json<Vec<ProfileInfo>> {
    Json(
        ThresholdProfile::ALL
            .into_iter()
            .map(|profile| ProfileInfo {
                name: profile.name(),
                thresholds: profile.thresholds(),
            })
            .collect(),
    )
}

async fn screen_handler(
    State(pool): State<Option<PgPool>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(payload): Json<ScreenRequest>,
) -> Json<ScreenResponse> {
    let start_time = Instant::now();

    let client_ip = extract_client_ip(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("Unknown");

    info!(
        "Screening request received: ip={}, {} lines, profile={}",
        client_ip,
        payload.keys.lines().count(),
        payload.profile.name()
    );

    // Key screening is bounded CPU work; run it inline
    let mut response = screen_request(&payload);
    let processing_time_ms = start_time.elapsed().as_millis() as i32;
    // Rejected batches get an id too
    let batch_id = *response.batch_id.get_or_insert_with(uuid::Uuid::new_v4);

    if response.valid {
        info!(
            "Screening passed: batch_id={}, keys={}, time={}ms",
            batch_id, response.key_count, processing_time_ms
        );
    } else {
        warn!(
            "Screening failed: batch_id={}, reason={}, time={}ms",
            batch_id, response.message, processing_time_ms
        );
    }

    if let Some(pool) = pool {
        let context = BatchContext {
            batch_id,
            client_ip: &client_ip,
            user_agent,
            processing_time_ms,
        };
        if let Err(e) = log_batch_to_database(&pool, &context, &payload, &response).await {
            error!("Failed to log batch to database: {}", e);
        }
    }

    Json(response)
}

/// Extract real client IP from headers (considering proxies) or fallback to socket address
pub fn extract_client_ip(headers: &HeaderMap, addr: Option<SocketAddr>) -> String {
    if let Some(forwarded_for) = headers.get("x-forwarded-for") {
        if let Ok(value) = forwarded_for.to_str() {
            // X-Forwarded-For can contain multiple IPs, take the first one
            if let Some(ip) = value.split(',').next() {
                return ip.trim().to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Ok(value) = real_ip.to_str() {
            return value.to_string();
        }
    }

    addr.map(|a| a.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
