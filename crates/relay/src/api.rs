use std::path::Path;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use common::models::{RelayResponse, SignalRequest};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{Instrument, info_span, warn};
use uuid::Uuid;

use crate::services::relay_service::SignalRelay;

pub type AppState = Arc<SignalRelay>;

pub fn relay_router(relay: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/api/send-telegram", post(send_signal))
        .route("/api/health", get(health))
        .with_state(relay);

    let router = match static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => router,
    };

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn send_signal(State(relay): State<AppState>, body: Bytes) -> impl IntoResponse {
    let span = info_span!("send_signal", request_id = %Uuid::new_v4());

    let outcome = match SignalRequest::from_slice(&body) {
        Ok(request) => relay.submit_signal(request).instrument(span).await,
        Err(e) => {
            span.in_scope(|| warn!("Unreadable signal body: {}", e));
            Err(e)
        }
    };

    match outcome {
        Ok(ack) => (StatusCode::OK, Json(ack)),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, Json(RelayResponse::failed())),
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}
