use std::sync::Arc;

use axum::extract::{MatchedPath, Request};

use apmhook_core::{ApmInteractor, CustomData};

use crate::template::TimingMarkers;

/// Whether a request came from the client or was dispatched internally
/// (fragment rendering, internal forwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestKind {
    #[default]
    Main,
    Sub,
}

impl RequestKind {
    pub fn of(req: &Request) -> Self {
        req.extensions().get::<RequestKind>().copied().unwrap_or_default()
    }

    pub fn is_main(self) -> bool {
        self == RequestKind::Main
    }
}

/// Per-request page instrumentation switch. Absent means enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instrument(pub bool);

impl Instrument {
    pub fn of(req: &Request) -> bool {
        req.extensions().get::<Instrument>().map_or(true, |i| i.0)
    }
}

/// Explicit route name, set by an upstream layer or the route itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteName(pub String);

impl RouteName {
    /// Explicit name first, then the matched route template.
    pub fn of(req: &Request) -> Option<&str> {
        if let Some(r) = req.extensions().get::<RouteName>() {
            return Some(r.0.as_str());
        }
        req.extensions().get::<MatchedPath>().map(|m| m.as_str())
    }
}

/// Response extension carrying an application error to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError(pub String);

/// Per-request state captured before the request is handed to the inner
/// service, and consumed by the response phase.
#[derive(Clone)]
pub struct RequestScope {
    pub kind: RequestKind,
    pub instrument: bool,
    pub data: CustomData,
    pub markers: Option<TimingMarkers>,
}

impl RequestScope {
    /// Capture the scope and expose the custom data handle to handlers.
    ///
    /// An upstream `CustomData` handle is reused so sub-requests report into
    /// the parent's buffer.
    pub fn attach(req: &mut Request) -> Self {
        let kind = RequestKind::of(req);
        let instrument = Instrument::of(req);
        let data = match req.extensions().get::<CustomData>() {
            Some(d) => d.clone(),
            None => {
                let d = CustomData::new();
                req.extensions_mut().insert(d.clone());
                d
            }
        };
        Self { kind, instrument, data, markers: None }
    }

    /// Offer inline timing markers to the handler.
    pub fn enable_markers(&mut self, req: &mut Request, interactor: Arc<dyn ApmInteractor>, instrument: bool) {
        let markers = TimingMarkers::new(interactor, self.data.clone(), instrument);
        req.extensions_mut().insert(markers.clone());
        self.markers = Some(markers);
    }
}
