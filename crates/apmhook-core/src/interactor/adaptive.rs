use std::sync::Arc;

use super::{ApmInteractor, BlackholeInteractor};
use crate::data::{EventAttributes, ParamValue};

/// Routes calls to the real agent when it is available, else to a blackhole.
///
/// Availability is decided once at construction.
#[derive(Clone)]
pub struct AdaptiveInteractor {
    target: Arc<dyn ApmInteractor>,
    agent_available: bool,
}

impl AdaptiveInteractor {
    pub fn new(agent: Option<Arc<dyn ApmInteractor>>) -> Self {
        match agent {
            Some(target) => Self { target, agent_available: true },
            None => {
                tracing::info!("no apm agent available; instrumentation calls are discarded");
                Self { target: Arc::new(BlackholeInteractor), agent_available: false }
            }
        }
    }

    pub fn agent_available(&self) -> bool {
        self.agent_available
    }
}

impl ApmInteractor for AdaptiveInteractor {
    fn set_application_name(&self, name: &str, license_key: Option<&str>, xmit: bool) {
        self.target.set_application_name(name, license_key, xmit);
    }
    fn set_transaction_name(&self, name: &str) {
        self.target.set_transaction_name(name);
    }
    fn ignore_transaction(&self) {
        self.target.ignore_transaction();
    }
    fn ignore_apdex(&self) {
        self.target.ignore_apdex();
    }
    fn start_transaction(&self, app_name: &str) {
        self.target.start_transaction(app_name);
    }
    fn end_transaction(&self) {
        self.target.end_transaction();
    }
    fn add_custom_metric(&self, name: &str, value: f64) {
        self.target.add_custom_metric(name, value);
    }
    fn add_custom_parameter(&self, name: &str, value: &ParamValue) {
        self.target.add_custom_parameter(name, value);
    }
    fn add_custom_event(&self, event_type: &str, attributes: &EventAttributes) {
        self.target.add_custom_event(event_type, attributes);
    }
    fn disable_auto_rum(&self) {
        self.target.disable_auto_rum();
    }
    fn browser_timing_header(&self) -> String {
        self.target.browser_timing_header()
    }
    fn browser_timing_footer(&self) -> String {
        self.target.browser_timing_footer()
    }
    fn notice_error(&self, message: &str) {
        self.target.notice_error(message);
    }
}
