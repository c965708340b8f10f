//! Integration config loader (strict parsing).

pub mod schema;

use std::fs;

use apmhook_core::error::{ApmError, Result};

pub use schema::{AgentMode, AgentSection, ListenerSection, NamingStrategyKind, ServerSection, HookConfig};

pub fn load_from_file(path: &str) -> Result<HookConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ApmError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<HookConfig> {
    let cfg: HookConfig = serde_yaml::from_str(s)
        .map_err(|e| ApmError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
