//! apmhook HTTP integration library entry.
//!
//! This crate wires the listeners, naming strategies, template markers, and
//! reference agent into an axum middleware stack. It is intended to be
//! consumed by applications, by the demo binary (`main.rs`), and by
//! integration tests.

pub mod agent;
pub mod app_state;
pub mod config;
pub mod context;
pub mod listener;
pub mod middleware;
pub mod naming;
pub mod ops;
pub mod router;
pub mod template;
