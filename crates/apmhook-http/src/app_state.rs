//! Shared state for the instrumentation middleware.
//!
//! Listeners and the interactor are built once at startup and shared via
//! `Arc`; cloning the state is cheap.

use std::sync::Arc;

use axum::Router;

use apmhook_core::error::Result;
use apmhook_core::{AdaptiveInteractor, ApmInteractor, LoggingInteractor};

use crate::agent::LocalAgent;
use crate::config::{AgentMode, HookConfig};
use crate::listener::{RequestListener, ResponseListener};
use crate::{middleware, naming};

#[derive(Clone)]
pub struct ApmState {
    interactor: Arc<dyn ApmInteractor>,
    request: Arc<RequestListener>,
    response: Arc<ResponseListener>,
    template_markers: bool,
    local_agent: Option<Arc<LocalAgent>>,
}

impl ApmState {
    pub fn new(
        interactor: Arc<dyn ApmInteractor>,
        request: RequestListener,
        response: ResponseListener,
    ) -> Self {
        Self {
            interactor,
            request: Arc::new(request),
            response: Arc::new(response),
            template_markers: false,
            local_agent: None,
        }
    }

    /// Offer `TimingMarkers` to handlers of main requests. The markers
    /// follow the response listener's `instrument` setting.
    pub fn with_template_markers(mut self, enabled: bool) -> Self {
        self.template_markers = enabled;
        self
    }

    /// Keep a handle on the in-process agent for the `/metrics` endpoint.
    pub fn with_local_agent(mut self, agent: Arc<LocalAgent>) -> Self {
        self.local_agent = Some(agent);
        self
    }

    /// Build the full stack from a validated config.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn from_config(cfg: &HookConfig) -> Result<Self> {
        cfg.validate()?;

        // 1) Agent selection
        let local = match cfg.agent.mode {
            AgentMode::Local => Some(Arc::new(LocalAgent::new())),
            AgentMode::Blackhole => None,
        };
        let adaptive = AdaptiveInteractor::new(local.clone().map(|a| a as Arc<dyn ApmInteractor>));
        let interactor: Arc<dyn ApmInteractor> = if cfg.agent.log_calls {
            Arc::new(LoggingInteractor::new(adaptive))
        } else {
            Arc::new(adaptive)
        };

        // 2) Listeners
        let l = &cfg.listener;
        let request = RequestListener::new(
            Arc::new(cfg.application.clone()),
            Arc::clone(&interactor),
            l.ignored_routes.iter().cloned(),
            l.ignored_paths.iter().cloned(),
            naming::from_kind(l.naming_strategy),
        )
        .with_ignored_apdex_paths(l.ignored_apdex_paths.iter().cloned())
        .with_http_cache(l.using_http_cache);
        let response = ResponseListener::new(Arc::clone(&interactor), l.instrument)
            .with_http_cache(l.using_http_cache)
            .with_max_inject_body_bytes(l.max_inject_body_bytes);

        tracing::info!(
            app = %cfg.application.name,
            agent = ?cfg.agent.mode,
            naming = ?l.naming_strategy,
            http_cache = l.using_http_cache,
            instrument = l.instrument,
            "apm instrumentation configured"
        );

        let mut state = Self::new(interactor, request, response)
            .with_template_markers(l.template_markers);
        if let Some(agent) = local {
            state = state.with_local_agent(agent);
        }
        Ok(state)
    }

    /// Wrap every route of `router` with the instrumentation middleware.
    pub fn layer_router<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(axum::middleware::from_fn_with_state(self, middleware::instrument))
    }

    pub fn interactor(&self) -> Arc<dyn ApmInteractor> {
        Arc::clone(&self.interactor)
    }

    pub fn request_listener(&self) -> &RequestListener {
        &self.request
    }

    pub fn response_listener(&self) -> &ResponseListener {
        &self.response
    }

    pub fn template_markers(&self) -> bool {
        self.template_markers
    }

    pub fn local_agent(&self) -> Option<Arc<LocalAgent>> {
        self.local_agent.clone()
    }
}
