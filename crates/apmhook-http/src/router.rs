//! Demo application router.
//!
//! A handful of pages exercising the instrumentation: a plain HTML page with
//! custom data, a page rendering the timing markers inline, a JSON endpoint,
//! a failing endpoint, plus the ops endpoints.

use axum::{
    extract::{Extension, Request},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;

use apmhook_core::{CustomData, EventAttributes};

use crate::app_state::ApmState;
use crate::context::{HandlerError, RouteName};
use crate::ops;
use crate::template::TimingMarkers;

pub fn build_router(state: ApmState) -> Router {
    let app = Router::new()
        .route("/", get(home))
        .route("/templated", get(templated))
        .route("/api/status", get(status))
        .route("/fail", get(fail))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state.clone());

    state.layer_router(app)
}

async fn home(Extension(data): Extension<CustomData>) -> Html<&'static str> {
    data.add_metric("Custom/HomeRenders", 1.0);
    data.add_parameter("page", "home");

    let mut sale = EventAttributes::new();
    sale.insert("color".into(), json!("red"));
    sale.insert("weight".into(), json!(12.5));
    data.add_event("WidgetSale", sale);

    Html("<!doctype html><html><head><title>apmhook</title></head><body><h1>home</h1></body></html>")
}

async fn templated(markers: Option<Extension<TimingMarkers>>) -> Response {
    let Some(Extension(markers)) = markers else {
        return Html("<html><head></head><body>markers disabled</body></html>").into_response();
    };
    let rendered = markers
        .header()
        .and_then(|h| markers.footer().map(|f| (h, f)));
    match rendered {
        Ok((header, footer)) => Html(format!(
            "<html><head>{header}<title>templated</title></head><body><p>inline</p>{footer}</body></html>"
        ))
        .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

async fn status(req: Request) -> Json<serde_json::Value> {
    json!({ "ok": true, "route": RouteName::of(&req) }).into()
}

async fn fail() -> Response {
    let mut res = (StatusCode::INTERNAL_SERVER_ERROR, "failed").into_response();
    res.extensions_mut().insert(HandlerError("demo failure".into()));
    res
}
