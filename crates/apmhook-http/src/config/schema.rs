use std::net::SocketAddr;

use serde::Deserialize;
use apmhook_core::error::{ApmError, Result};
use apmhook_core::ApmConfig;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HookConfig {
    pub version: u32,

    pub application: ApmConfig,

    #[serde(default)]
    pub agent: AgentSection,

    #[serde(default)]
    pub listener: ListenerSection,

    #[serde(default)]
    pub server: ServerSection,
}

impl HookConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ApmError::UnsupportedVersion(self.version));
        }
        if self.application.name.trim() != self.application.name {
            return Err(ApmError::BadConfig(
                "application.name must not have leading or trailing whitespace".into(),
            ));
        }

        self.listener.validate()?;
        self.server.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentMode {
    /// In-process aggregating agent with `/metrics` exposition.
    #[default]
    Local,
    /// No agent; every call is discarded.
    Blackhole,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSection {
    #[serde(default)]
    pub mode: AgentMode,

    /// Wrap the agent so every call is logged at debug level.
    #[serde(default)]
    pub log_calls: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategyKind {
    #[default]
    Route,
    Uri,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListenerSection {
    #[serde(default = "default_true")]
    pub instrument: bool,

    /// An HTTP reverse cache sits in front of the application.
    #[serde(default)]
    pub using_http_cache: bool,

    #[serde(default)]
    pub naming_strategy: NamingStrategyKind,

    #[serde(default = "default_true")]
    pub template_markers: bool,

    #[serde(default)]
    pub ignored_routes: Vec<String>,

    #[serde(default)]
    pub ignored_paths: Vec<String>,

    /// Requests on these paths are excluded from the apdex score only.
    #[serde(default)]
    pub ignored_apdex_paths: Vec<String>,

    #[serde(default = "default_max_inject_body_bytes")]
    pub max_inject_body_bytes: usize,
}

impl Default for ListenerSection {
    fn default() -> Self {
        Self {
            instrument: default_true(),
            using_http_cache: false,
            naming_strategy: NamingStrategyKind::default(),
            template_markers: default_true(),
            ignored_routes: Vec::new(),
            ignored_paths: Vec::new(),
            ignored_apdex_paths: Vec::new(),
            max_inject_body_bytes: default_max_inject_body_bytes(),
        }
    }
}

impl ListenerSection {
    pub fn validate(&self) -> Result<()> {
        if !(1024..=64 * 1024 * 1024).contains(&self.max_inject_body_bytes) {
            return Err(ApmError::BadConfig(
                "listener.max_inject_body_bytes must be between 1024 and 67108864".into(),
            ));
        }
        if self.ignored_routes.iter().any(|r| r.is_empty()) {
            return Err(ApmError::BadConfig("listener.ignored_routes entries must not be empty".into()));
        }
        if let Some(p) = self.ignored_paths.iter().find(|p| !p.starts_with('/')) {
            return Err(ApmError::BadConfig(format!(
                "listener.ignored_paths entry must start with '/': {p}"
            )));
        }
        if let Some(p) = self.ignored_apdex_paths.iter().find(|p| !p.starts_with('/')) {
            return Err(ApmError::BadConfig(format!(
                "listener.ignored_apdex_paths entry must start with '/': {p}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|_| ApmError::BadConfig(format!("server.listen must be a valid SocketAddr: {}", self.listen)))
    }
}

fn default_true() -> bool {
    true
}
fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_max_inject_body_bytes() -> usize {
    2 * 1024 * 1024
}
