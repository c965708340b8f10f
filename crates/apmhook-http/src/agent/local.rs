use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use apmhook_core::{ApmInteractor, EventAttributes, ParamValue};

use super::metrics::AgentMetrics;

/// In-process agent that aggregates every call into Prometheus series.
///
/// Stands in for a vendor agent during development and in the demo binary.
/// Per-call data is folded into process-wide counters; nothing is tracked
/// per transaction.
pub struct LocalAgent {
    app_name: RwLock<String>,
    auto_rum: AtomicBool,
    metrics: AgentMetrics,
}

impl Default for LocalAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalAgent {
    pub fn new() -> Self {
        Self {
            app_name: RwLock::new(String::new()),
            auto_rum: AtomicBool::new(true),
            metrics: AgentMetrics::default(),
        }
    }

    pub fn metrics(&self) -> &AgentMetrics {
        &self.metrics
    }

    pub fn app_name(&self) -> String {
        self.app_name.read().map(|g| g.clone()).unwrap_or_default()
    }

    /// Whether the agent would still inject its own RUM snippet.
    pub fn auto_rum_enabled(&self) -> bool {
        self.auto_rum.load(Ordering::Relaxed)
    }

    /// Prometheus text exposition of everything seen so far.
    pub fn render(&self) -> String {
        self.metrics.render(&[("apmhook_auto_rum_enabled", u64::from(self.auto_rum_enabled()))])
    }
}

impl ApmInteractor for LocalAgent {
    fn set_application_name(&self, name: &str, _license_key: Option<&str>, _xmit: bool) {
        if let Ok(mut g) = self.app_name.write() {
            if *g != name {
                *g = name.to_string();
            }
        }
        self.metrics.app_names.inc(&[("app", name)]);
    }

    fn set_transaction_name(&self, name: &str) {
        self.metrics.transactions_named.inc(&[("name", name)]);
    }

    fn ignore_transaction(&self) {
        self.metrics.transactions_ignored.inc(&[]);
    }

    fn ignore_apdex(&self) {
        self.metrics.apdex_ignored.inc(&[]);
    }

    fn start_transaction(&self, app_name: &str) {
        self.metrics.transactions_started.inc(&[("app", app_name)]);
    }

    fn end_transaction(&self) {
        self.metrics.transactions_ended.inc(&[]);
    }

    fn add_custom_metric(&self, name: &str, value: f64) {
        self.metrics.custom_metrics.set(&[("name", name)], value);
    }

    fn add_custom_parameter(&self, name: &str, _value: &ParamValue) {
        self.metrics.custom_parameters.inc(&[("name", name)]);
    }

    fn add_custom_event(&self, event_type: &str, _attributes: &EventAttributes) {
        self.metrics.custom_events.inc(&[("type", event_type)]);
    }

    fn disable_auto_rum(&self) {
        self.auto_rum.store(false, Ordering::Relaxed);
        self.metrics.auto_rum_disabled.inc(&[]);
    }

    fn browser_timing_header(&self) -> String {
        let app = self.app_name();
        format!(
            "<script type=\"text/javascript\">window.__apm={{app:{},start:Date.now()}};</script>",
            js_string(&app)
        )
    }

    fn browser_timing_footer(&self) -> String {
        "<script type=\"text/javascript\">if(window.__apm){window.__apm.end=Date.now();}</script>".to_string()
    }

    fn notice_error(&self, message: &str) {
        tracing::warn!(error = %message, "apm error noticed");
        self.metrics.errors.inc(&[]);
    }
}

/// JSON string literal, which is also a valid JS literal; `<` is escaped so
/// the value cannot close the surrounding script tag.
fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string().replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_embeds_escaped_app_name() {
        let agent = LocalAgent::new();
        agent.set_application_name("a</script>", None, false);
        let header = agent.browser_timing_header();
        assert!(header.contains("app:\"a\\u003c/script>\""));
        assert_eq!(header.matches("</script>").count(), 1);
    }

    #[test]
    fn request_derived_names_stay_bounded() {
        use crate::agent::metrics::{DEFAULT_MAX_SERIES, OVERFLOW_LABEL};

        let agent = LocalAgent::new();
        let before = agent.render().lines().count();
        for i in 0..5000 {
            let name = format!("GET /no/such/{i}");
            agent.set_transaction_name(&name);
            agent.add_custom_metric(&name, 1.0);
        }

        let named = &agent.metrics().transactions_named;
        assert_eq!(named.series(), DEFAULT_MAX_SERIES + 1);
        assert_eq!(named.get(&[("name", OVERFLOW_LABEL)]), (5000 - DEFAULT_MAX_SERIES) as u64);
        assert_eq!(agent.metrics().custom_metrics.series(), DEFAULT_MAX_SERIES + 1);
        assert_eq!(agent.render().lines().count(), before + 2 * (DEFAULT_MAX_SERIES + 1));
    }

    #[test]
    fn auto_rum_flag_flips_once_disabled() {
        let agent = LocalAgent::new();
        assert!(agent.auto_rum_enabled());
        agent.disable_auto_rum();
        assert!(!agent.auto_rum_enabled());
        assert!(agent.render().contains("apmhook_auto_rum_enabled 0\n"));
    }
}
