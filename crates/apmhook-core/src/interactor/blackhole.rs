use super::ApmInteractor;
use crate::data::{EventAttributes, ParamValue};

/// Interactor that accepts every call and does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlackholeInteractor;

impl ApmInteractor for BlackholeInteractor {
    fn set_application_name(&self, _name: &str, _license_key: Option<&str>, _xmit: bool) {}
    fn set_transaction_name(&self, _name: &str) {}
    fn ignore_transaction(&self) {}
    fn ignore_apdex(&self) {}
    fn start_transaction(&self, _app_name: &str) {}
    fn end_transaction(&self) {}
    fn add_custom_metric(&self, _name: &str, _value: f64) {}
    fn add_custom_parameter(&self, _name: &str, _value: &ParamValue) {}
    fn add_custom_event(&self, _event_type: &str, _attributes: &EventAttributes) {}
    fn disable_auto_rum(&self) {}

    fn browser_timing_header(&self) -> String {
        String::new()
    }

    fn browser_timing_footer(&self) -> String {
        String::new()
    }

    fn notice_error(&self, _message: &str) {}
}
