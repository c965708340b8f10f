//! Request context types shared across layers.
//!
//! Handlers and upstream layers communicate with the listeners through
//! request/response extensions only, so nothing here couples to a specific
//! router setup.

pub mod request;

pub use request::{HandlerError, Instrument, RequestKind, RequestScope, RouteName};
