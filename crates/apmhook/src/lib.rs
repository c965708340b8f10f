//! Top-level facade crate for apmhook.
//!
//! Re-exports core types and the HTTP integration so users can depend on a single crate.

pub mod core {
    pub use apmhook_core::*;
}

pub mod http {
    pub use apmhook_http::*;
}
