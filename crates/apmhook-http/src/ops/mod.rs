//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format from the in-process agent

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::ApmState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<ApmState>) -> Response {
    match state.local_agent() {
        Some(agent) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            agent.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "no local agent").into_response(),
    }
}
