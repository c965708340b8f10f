//! Static application identity reported to the agent.

use serde::Deserialize;

/// Application name and licensing, fixed at startup and shared via `Arc`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApmConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub license_key: Option<String>,

    /// Flush data collected under the previous name when renaming.
    #[serde(default)]
    pub xmit: bool,
}

impl ApmConfig {
    pub fn new(name: impl Into<String>, license_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            license_key: Some(license_key.into()),
            xmit: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn license_key(&self) -> Option<&str> {
        self.license_key.as_deref()
    }
}
