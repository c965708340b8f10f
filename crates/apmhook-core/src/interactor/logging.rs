use tracing::debug;

use super::ApmInteractor;
use crate::data::{EventAttributes, ParamValue};

/// Decorator that logs every call at debug level, then delegates.
#[derive(Debug, Clone)]
pub struct LoggingInteractor<I> {
    inner: I,
}

impl<I: ApmInteractor> LoggingInteractor<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: ApmInteractor> ApmInteractor for LoggingInteractor<I> {
    fn set_application_name(&self, name: &str, license_key: Option<&str>, xmit: bool) {
        debug!(app = %name, has_license = license_key.is_some(), xmit, "apm set_application_name");
        self.inner.set_application_name(name, license_key, xmit);
    }

    fn set_transaction_name(&self, name: &str) {
        debug!(transaction = %name, "apm set_transaction_name");
        self.inner.set_transaction_name(name);
    }

    fn ignore_transaction(&self) {
        debug!("apm ignore_transaction");
        self.inner.ignore_transaction();
    }

    fn ignore_apdex(&self) {
        debug!("apm ignore_apdex");
        self.inner.ignore_apdex();
    }

    fn start_transaction(&self, app_name: &str) {
        debug!(app = %app_name, "apm start_transaction");
        self.inner.start_transaction(app_name);
    }

    fn end_transaction(&self) {
        debug!("apm end_transaction");
        self.inner.end_transaction();
    }

    fn add_custom_metric(&self, name: &str, value: f64) {
        debug!(metric = %name, value, "apm add_custom_metric");
        self.inner.add_custom_metric(name, value);
    }

    fn add_custom_parameter(&self, name: &str, value: &ParamValue) {
        debug!(parameter = %name, value = %value, "apm add_custom_parameter");
        self.inner.add_custom_parameter(name, value);
    }

    fn add_custom_event(&self, event_type: &str, attributes: &EventAttributes) {
        debug!(event = %event_type, attributes = attributes.len(), "apm add_custom_event");
        self.inner.add_custom_event(event_type, attributes);
    }

    fn disable_auto_rum(&self) {
        debug!("apm disable_auto_rum");
        self.inner.disable_auto_rum();
    }

    fn browser_timing_header(&self) -> String {
        debug!("apm browser_timing_header");
        self.inner.browser_timing_header()
    }

    fn browser_timing_footer(&self) -> String {
        debug!("apm browser_timing_footer");
        self.inner.browser_timing_footer()
    }

    fn notice_error(&self, message: &str) {
        debug!(error = %message, "apm notice_error");
        self.inner.notice_error(message);
    }
}
