use std::sync::Arc;

use axum::body::{Body, HttpBody};
use axum::http::header;
use axum::response::Response;
use tracing::{debug, warn};

use apmhook_core::html::{inject_timing, is_html_content_type, Placement};
use apmhook_core::{ApmInteractor, CustomData};

use crate::context::{HandlerError, RequestScope};
use crate::template::TimingExtension;

const DEFAULT_MAX_INJECT_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Response-phase listener: custom data flush, page instrumentation, and
/// explicit transaction end behind an HTTP cache.
pub struct ResponseListener {
    interactor: Arc<dyn ApmInteractor>,
    instrument: bool,
    using_http_cache: bool,
    max_inject_body_bytes: usize,
}

impl ResponseListener {
    pub fn new(interactor: Arc<dyn ApmInteractor>, instrument: bool) -> Self {
        Self {
            interactor,
            instrument,
            using_http_cache: false,
            max_inject_body_bytes: DEFAULT_MAX_INJECT_BODY_BYTES,
        }
    }

    /// End transactions explicitly, pairing the request-phase start.
    pub fn with_http_cache(mut self, enabled: bool) -> Self {
        self.using_http_cache = enabled;
        self
    }

    /// Larger bodies are passed through untouched.
    pub fn with_max_inject_body_bytes(mut self, max: usize) -> Self {
        self.max_inject_body_bytes = max;
        self
    }

    pub fn instrument_enabled(&self) -> bool {
        self.instrument
    }

    pub async fn on_response(&self, scope: &RequestScope, response: Response) -> Response {
        if !scope.kind.is_main() {
            return response;
        }

        self.flush_custom_data(&scope.data);

        if let Some(err) = response.extensions().get::<HandlerError>() {
            self.interactor.notice_error(&err.0);
        }

        let response = if self.instrument {
            let ext = scope.markers.as_ref().map(|m| m as &dyn TimingExtension);
            self.instrument_page(scope.instrument, ext, response).await
        } else {
            response
        };

        if self.using_http_cache {
            self.interactor.end_transaction();
        }

        response
    }

    /// Forward everything buffered for the request, in insertion order.
    pub fn flush_custom_data(&self, data: &CustomData) {
        let drained = data.drain();
        for (name, value) in &drained.metrics {
            self.interactor.add_custom_metric(name, *value);
        }
        for (name, value) in &drained.parameters {
            self.interactor.add_custom_parameter(name, value);
        }
        for (event_type, instances) in &drained.events {
            for attributes in instances {
                self.interactor.add_custom_event(event_type, attributes);
            }
        }
    }

    async fn instrument_page(
        &self,
        request_instrument: bool,
        ext: Option<&dyn TimingExtension>,
        response: Response,
    ) -> Response {
        // Inline markers already switched auto RUM off.
        if !ext.is_some_and(|e| e.is_used()) {
            self.interactor.disable_auto_rum();
        }

        if !request_instrument {
            return response;
        }

        let placement = Placement {
            header: !ext.is_some_and(|e| e.is_header_called()),
            footer: !ext.is_some_and(|e| e.is_footer_called()),
        };
        if placement.is_empty() || !is_html(&response) {
            return response;
        }

        let (mut parts, body) = response.into_parts();

        // Streams of unknown length are never buffered.
        let len = match body.size_hint().exact() {
            Some(n) => n,
            None => return Response::from_parts(parts, body),
        };
        if len == 0 || len > self.max_inject_body_bytes as u64 {
            return Response::from_parts(parts, body);
        }

        let bytes = match axum::body::to_bytes(body, len as usize).await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "failed to buffer html body for timing injection");
                parts.headers.remove(header::CONTENT_LENGTH);
                return Response::from_parts(parts, Body::empty());
            }
        };

        let injected = inject_timing(
            &bytes,
            placement,
            || self.interactor.browser_timing_header(),
            || self.interactor.browser_timing_footer(),
        );
        match injected {
            Some(rewritten) => {
                debug!(before = bytes.len(), after = rewritten.len(), "timing markers injected");
                parts.headers.remove(header::CONTENT_LENGTH);
                Response::from_parts(parts, Body::from(rewritten))
            }
            None => Response::from_parts(parts, Body::from(bytes)),
        }
    }
}

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(is_html_content_type)
}
