//! Axum middleware driving both listeners around the inner service.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::Instrument as _;

use crate::app_state::ApmState;
use crate::context::RequestScope;

pub async fn instrument(State(state): State<ApmState>, mut req: Request, next: Next) -> Response {
    let mut scope = RequestScope::attach(&mut req);
    if state.template_markers() && scope.kind.is_main() {
        let instrument = state.response_listener().instrument_enabled();
        scope.enable_markers(&mut req, state.interactor(), instrument);
    }

    state.request_listener().on_request(&req);

    let span = tracing::debug_span!(
        "apm_request",
        method = %req.method(),
        path = %req.uri().path(),
        kind = ?scope.kind
    );
    let response = next.run(req).instrument(span).await;

    state.response_listener().on_response(&scope, response).await
}
