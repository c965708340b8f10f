//! Reference agent backends.
//!
//! `LocalAgent` keeps aggregate counters in-process and renders them for the
//! `/metrics` endpoint. Vendor agents plug in through `ApmInteractor` instead.

pub mod local;
pub mod metrics;

pub use local::LocalAgent;
