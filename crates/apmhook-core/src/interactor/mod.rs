//! Agent capability trait and stock implementations.
//!
//! Listeners never talk to an agent directly; they forward to whatever
//! `ApmInteractor` was configured. `BlackholeInteractor` stands in when no
//! agent is available so application code keeps working unchanged.

mod adaptive;
mod blackhole;
mod logging;

pub use adaptive::AdaptiveInteractor;
pub use blackhole::BlackholeInteractor;
pub use logging::LoggingInteractor;

use crate::data::{EventAttributes, ParamValue};

/// Capabilities required from an APM agent client.
///
/// Implementations own their state; every method takes `&self` so one
/// instance can be shared across request tasks behind an `Arc`.
pub trait ApmInteractor: Send + Sync {
    /// Report under `name`; `xmit` flushes data gathered under the old name.
    fn set_application_name(&self, name: &str, license_key: Option<&str>, xmit: bool);

    fn set_transaction_name(&self, name: &str);

    /// Drop the current transaction entirely.
    fn ignore_transaction(&self);

    /// Keep the transaction but exclude it from the Apdex score.
    fn ignore_apdex(&self);

    fn start_transaction(&self, app_name: &str);

    fn end_transaction(&self);

    fn add_custom_metric(&self, name: &str, value: f64);

    fn add_custom_parameter(&self, name: &str, value: &ParamValue);

    fn add_custom_event(&self, event_type: &str, attributes: &EventAttributes);

    /// Turn off the agent's own page instrumentation.
    fn disable_auto_rum(&self);

    fn browser_timing_header(&self) -> String;

    fn browser_timing_footer(&self) -> String;

    /// Attach an error to the current transaction.
    fn notice_error(&self, message: &str);
}

impl<T: ApmInteractor + ?Sized> ApmInteractor for std::sync::Arc<T> {
    fn set_application_name(&self, name: &str, license_key: Option<&str>, xmit: bool) {
        (**self).set_application_name(name, license_key, xmit);
    }
    fn set_transaction_name(&self, name: &str) {
        (**self).set_transaction_name(name);
    }
    fn ignore_transaction(&self) {
        (**self).ignore_transaction();
    }
    fn ignore_apdex(&self) {
        (**self).ignore_apdex();
    }
    fn start_transaction(&self, app_name: &str) {
        (**self).start_transaction(app_name);
    }
    fn end_transaction(&self) {
        (**self).end_transaction();
    }
    fn add_custom_metric(&self, name: &str, value: f64) {
        (**self).add_custom_metric(name, value);
    }
    fn add_custom_parameter(&self, name: &str, value: &ParamValue) {
        (**self).add_custom_parameter(name, value);
    }
    fn add_custom_event(&self, event_type: &str, attributes: &EventAttributes) {
        (**self).add_custom_event(event_type, attributes);
    }
    fn disable_auto_rum(&self) {
        (**self).disable_auto_rum();
    }
    fn browser_timing_header(&self) -> String {
        (**self).browser_timing_header()
    }
    fn browser_timing_footer(&self) -> String {
        (**self).browser_timing_footer()
    }
    fn notice_error(&self, message: &str) {
        (**self).notice_error(message);
    }
}
