//! HTTP request handlers
//!
//! The scan submission endpoint, the liveness probe, and the embedded
//! scanner page the phone loads after scanning the pairing QR code.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::state::AppState;

/// Header carrying the pairing token as an alternative to `?token=`
pub const TOKEN_HEADER: &str = "x-token";

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/scanner", get(scanner_handler))
        .route("/api/ping", get(ping_handler))
        .route("/api/submit", post(submit_handler))
        .route("/api/last", get(last_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Structured acknowledgement returned by every API operation
#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Ack {
    fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    fn err(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(reason.into()),
        }
    }
}

/// Query parameters for scan submission
#[derive(Debug, Deserialize)]
pub struct SubmitQuery {
    #[serde(default)]
    token: Option<String>,
}

/// Submission body. Parsed leniently: a malformed or absent body is treated
/// as an empty object, so the only hard failure below auth is a missing code.
#[derive(Debug, Default, Deserialize)]
struct SubmitBody {
    #[serde(default)]
    code: Option<String>,
}

/// Extract the token from the `X-Token` header or the query string
///
/// The header takes precedence when both are present.
fn extract_token(query: &SubmitQuery, headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(TOKEN_HEADER) {
        if let Ok(token) = value.to_str() {
            return Some(token.to_string());
        }
    }
    query.token.clone()
}

/// Serve the scanner page with the session token embedded
async fn scanner_handler(State(state): State<Arc<AppState>>) -> Response {
    match scanlink_web::scanner_page(&state.config.token) {
        Some(page) => Html(page).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Liveness probe used by the phone page before scanning. No auth.
async fn ping_handler() -> Json<Ack> {
    Json(Ack::ok())
}

/// The scanner page no longer receives scans back; kept for old clients that
/// poll it.
async fn last_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true, "last": null }))
}

/// Accept one scanned code from the phone
///
/// Validation order: token, then body shape, then a non-empty code. Rejected
/// submissions have no side effects; accepted ones are logged durably before
/// being queued for the consumer.
async fn submit_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SubmitQuery>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Ack>) {
    let token = extract_token(&query, &headers);
    if !state.validate_token(token.as_deref()) {
        warn!("Rejected scan submission: invalid or missing token");
        return (StatusCode::UNAUTHORIZED, Json(Ack::err("invalid token")));
    }

    let parsed: SubmitBody = serde_json::from_str(&body).unwrap_or_default();
    let code = parsed.code.as_deref().unwrap_or("").trim();
    if code.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(Ack::err("missing code")));
    }

    let event = scanlink_core::ScanEvent::mobile(code);
    if let Err(e) = state
        .log
        .append(&event.code, event.source, event.received_at)
    {
        // The scan still reaches the consumer; only the durable copy is lost.
        warn!("Failed to append scan log: {}", e);
    }
    info!("Accepted scan: {}", event.code);
    state.events.push(event);

    (StatusCode::OK, Json(Ack::ok()))
}
