//! Request and response phase listeners.
//!
//! Both are built once at startup and shared via `Arc`; per-request state
//! travels in `RequestScope`.

pub mod request;
pub mod response;

pub use request::RequestListener;
pub use response::ResponseListener;
