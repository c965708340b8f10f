use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::Request;

use apmhook_core::{ApmConfig, ApmInteractor};

use crate::context::{RequestKind, RouteName};
use crate::naming::TransactionNamingStrategy;

/// Request-phase listener: application name, transaction name, ignore rules.
pub struct RequestListener {
    config: Arc<ApmConfig>,
    interactor: Arc<dyn ApmInteractor>,
    ignored_routes: HashSet<String>,
    ignored_paths: HashSet<String>,
    ignored_apdex_paths: HashSet<String>,
    naming: Box<dyn TransactionNamingStrategy>,
    using_http_cache: bool,
}

impl RequestListener {
    pub fn new(
        config: Arc<ApmConfig>,
        interactor: Arc<dyn ApmInteractor>,
        ignored_routes: impl IntoIterator<Item = String>,
        ignored_paths: impl IntoIterator<Item = String>,
        naming: Box<dyn TransactionNamingStrategy>,
    ) -> Self {
        Self {
            config,
            interactor,
            ignored_routes: ignored_routes.into_iter().collect(),
            ignored_paths: ignored_paths.into_iter().collect(),
            ignored_apdex_paths: HashSet::new(),
            naming,
            using_http_cache: false,
        }
    }

    /// Start transactions explicitly, for deployments behind an HTTP cache.
    pub fn with_http_cache(mut self, enabled: bool) -> Self {
        self.using_http_cache = enabled;
        self
    }

    /// Paths still tracked as transactions but kept out of the apdex score.
    pub fn with_ignored_apdex_paths(mut self, paths: impl IntoIterator<Item = String>) -> Self {
        self.ignored_apdex_paths = paths.into_iter().collect();
        self
    }

    /// Run all request-phase steps in order.
    pub fn on_request(&self, req: &Request) {
        self.set_application_name(req);
        self.set_transaction_name(req);
        self.set_ignore_transaction(req);
        self.set_ignore_apdex(req);
    }

    pub fn set_application_name(&self, req: &Request) {
        if !RequestKind::of(req).is_main() {
            return;
        }
        let name = self.config.name();
        if name.is_empty() {
            return;
        }

        if self.using_http_cache {
            self.interactor.start_transaction(name);
        }
        self.interactor
            .set_application_name(name, self.config.license_key(), self.config.xmit);
    }

    pub fn set_transaction_name(&self, req: &Request) {
        if !RequestKind::of(req).is_main() {
            return;
        }
        let name = self.naming.transaction_name(req);
        self.interactor.set_transaction_name(&name);
    }

    pub fn set_ignore_transaction(&self, req: &Request) {
        if !RequestKind::of(req).is_main() {
            return;
        }
        let route_ignored = RouteName::of(req).is_some_and(|r| self.ignored_routes.contains(r));
        let path_ignored = self.ignored_paths.contains(req.uri().path());
        if route_ignored || path_ignored {
            tracing::debug!(path = %req.uri().path(), route_ignored, path_ignored, "transaction ignored");
            self.interactor.ignore_transaction();
        }
    }

    pub fn set_ignore_apdex(&self, req: &Request) {
        if !RequestKind::of(req).is_main() {
            return;
        }
        if self.ignored_apdex_paths.contains(req.uri().path()) {
            self.interactor.ignore_apdex();
        }
    }
}
