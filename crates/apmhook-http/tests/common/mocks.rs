use std::sync::Mutex;

use apmhook_core::{ApmInteractor, EventAttributes, ParamValue};

use super::{FOOTER, HEADER};

/// One recorded interactor call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetApplicationName(String),
    SetTransactionName(String),
    IgnoreTransaction,
    IgnoreApdex,
    StartTransaction(String),
    EndTransaction,
    CustomMetric(String, f64),
    CustomParameter(String, ParamValue),
    CustomEvent(String, EventAttributes),
    DisableAutoRum,
    TimingHeader,
    TimingFooter,
    NoticeError(String),
}

/// Interactor double recording every call in order.
#[derive(Default)]
pub struct RecordingInteractor {
    calls: Mutex<Vec<Call>>,
}

impl RecordingInteractor {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    pub fn reset(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ApmInteractor for RecordingInteractor {
    fn set_application_name(&self, name: &str, _license_key: Option<&str>, _xmit: bool) {
        self.push(Call::SetApplicationName(name.into()));
    }
    fn set_transaction_name(&self, name: &str) {
        self.push(Call::SetTransactionName(name.into()));
    }
    fn ignore_transaction(&self) {
        self.push(Call::IgnoreTransaction);
    }
    fn ignore_apdex(&self) {
        self.push(Call::IgnoreApdex);
    }
    fn start_transaction(&self, app_name: &str) {
        self.push(Call::StartTransaction(app_name.into()));
    }
    fn end_transaction(&self) {
        self.push(Call::EndTransaction);
    }
    fn add_custom_metric(&self, name: &str, value: f64) {
        self.push(Call::CustomMetric(name.into(), value));
    }
    fn add_custom_parameter(&self, name: &str, value: &ParamValue) {
        self.push(Call::CustomParameter(name.into(), value.clone()));
    }
    fn add_custom_event(&self, event_type: &str, attributes: &EventAttributes) {
        self.push(Call::CustomEvent(event_type.into(), attributes.clone()));
    }
    fn disable_auto_rum(&self) {
        self.push(Call::DisableAutoRum);
    }
    fn browser_timing_header(&self) -> String {
        self.push(Call::TimingHeader);
        HEADER.to_string()
    }
    fn browser_timing_footer(&self) -> String {
        self.push(Call::TimingFooter);
        FOOTER.to_string()
    }
    fn notice_error(&self, message: &str) {
        self.push(Call::NoticeError(message.into()));
    }
}
