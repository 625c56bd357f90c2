use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::command::Command;
use crate::render::RenderedResponse;
use crate::service::RisaleService;

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub text: String,
}

pub fn router(service: Arc<RisaleService>) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/risale/reply", post(reply_handler))
        .route("/risale/command", post(command_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Any text is answered; unrecognized or blank text gets the help reply.
async fn reply_handler(
    State(service): State<Arc<RisaleService>>,
    Json(req): Json<ReplyRequest>,
) -> Json<RenderedResponse> {
    Json(service.handle_text(&req.text).await)
}

async fn command_handler(
    State(service): State<Arc<RisaleService>>,
    Json(command): Json<Command>,
) -> Json<RenderedResponse> {
    tracing::debug!(%command, "command request");
    Json(service.handle_command(&command).await)
}
