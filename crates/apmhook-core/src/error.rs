//! Shared error type across apmhook crates.

use thiserror::Error;

/// Stable error kinds, used in logs and by callers that branch on the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid or inconsistent configuration.
    BadConfig,
    /// Unsupported config schema version.
    UnsupportedVersion,
    /// Template timing helpers called out of order.
    Template,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// String representation used in structured log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadConfig => "BAD_CONFIG",
            ErrorKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorKind::Template => "TEMPLATE",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ApmError>;

/// Unified error type used by core and the HTTP integration.
#[derive(Debug, Error)]
pub enum ApmError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version: {0}")]
    UnsupportedVersion(u32),
    #[error("template: {0}")]
    Template(&'static str),
    #[error("internal: {0}")]
    Internal(String),
}

impl ApmError {
    /// Map the error to its stable kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApmError::BadConfig(_) => ErrorKind::BadConfig,
            ApmError::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            ApmError::Template(_) => ErrorKind::Template,
            ApmError::Internal(_) => ErrorKind::Internal,
        }
    }
}
