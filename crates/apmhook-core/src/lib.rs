//! apmhook core: transport-agnostic APM primitives.
//!
//! This crate defines the agent capability trait (`ApmInteractor`), its stock
//! implementations, the per-request custom data buffer, and the HTML timing
//! marker splicing used by the HTTP integration. It carries no web framework
//! or runtime dependencies so it can back other integrations too.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `ApmError`/`Result` so instrumentation
//! never takes the host application down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod data;
pub mod error;
pub mod html;
pub mod interactor;

pub use config::ApmConfig;
pub use data::{CustomData, Drained, EventAttributes, ParamValue};
/// Shared result type.
pub use error::{ApmError, ErrorKind, Result};
pub use interactor::{AdaptiveInteractor, ApmInteractor, BlackholeInteractor, LoggingInteractor};
