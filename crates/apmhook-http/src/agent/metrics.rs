//! Label-keyed counters and gauges backing `LocalAgent`.
//!
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering. Gauges hold `f64` values stored as bits in an `AtomicU64`.
//!
//! Label values come from request data (transaction names, custom metric
//! names), so each vec holds at most `max_series` distinct series. Once full,
//! unseen label sets are folded into one series whose values are all
//! `OVERFLOW_LABEL`.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default series cap per vec.
pub const DEFAULT_MAX_SERIES: usize = 500;

/// Label value of the series collecting everything past the cap.
pub const OVERFLOW_LABEL: &str = "other";

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

/// Existing series and series under the cap keep their key; the rest share
/// the overflow series.
fn slot_key(
    map: &DashMap<Vec<(String, String)>, AtomicU64>,
    max_series: usize,
    labels: &[(&str, &str)],
) -> Vec<(String, String)> {
    let key = label_key(labels);
    if map.contains_key(&key) || map.len() < max_series {
        return key;
    }
    key.into_iter().map(|(k, _)| (k, OVERFLOW_LABEL.to_string())).collect()
}

fn render_labels(key: &[(String, String)]) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Series lines sorted so output is stable regardless of map sharding.
fn write_series(out: &mut String, name: &str, mut rows: Vec<(String, String)>) {
    rows.sort();
    for (labels, val) in rows {
        if labels.is_empty() {
            let _ = writeln!(out, "{} {}", name, val);
        } else {
            let _ = writeln!(out, "{}{{{}}} {}", name, labels, val);
        }
    }
}

pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
    max_series: usize,
}

impl Default for CounterVec {
    fn default() -> Self {
        Self::with_max_series(DEFAULT_MAX_SERIES)
    }
}

impl CounterVec {
    pub fn with_max_series(max_series: usize) -> Self {
        Self { map: DashMap::new(), max_series }
    }

    /// Number of distinct series held, overflow included.
    pub fn series(&self) -> usize {
        self.map.len()
    }

    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let key = slot_key(&self.map, self.max_series, labels);
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map_or(0, |c| c.value().load(Ordering::Relaxed))
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let rows = self
            .map
            .iter()
            .map(|r| (render_labels(r.key()), r.value().load(Ordering::Relaxed).to_string()))
            .collect();
        write_series(out, name, rows);
    }
}

pub struct GaugeVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
    max_series: usize,
}

impl Default for GaugeVec {
    fn default() -> Self {
        Self::with_max_series(DEFAULT_MAX_SERIES)
    }
}

impl GaugeVec {
    pub fn with_max_series(max_series: usize) -> Self {
        Self { map: DashMap::new(), max_series }
    }

    /// Number of distinct series held, overflow included.
    pub fn series(&self) -> usize {
        self.map.len()
    }

    /// Overwrite with the latest value.
    pub fn set(&self, labels: &[(&str, &str)], v: f64) {
        let key = slot_key(&self.map, self.max_series, labels);
        let gauge = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        gauge.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> Option<f64> {
        self.map
            .get(&label_key(labels))
            .map(|g| f64::from_bits(g.value().load(Ordering::Relaxed)))
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} gauge", name);
        let rows = self
            .map
            .iter()
            .map(|r| {
                let v = f64::from_bits(r.value().load(Ordering::Relaxed));
                (render_labels(r.key()), v.to_string())
            })
            .collect();
        write_series(out, name, rows);
    }
}

#[derive(Default)]
pub struct AgentMetrics {
    pub app_names: CounterVec,
    pub transactions_named: CounterVec,
    pub transactions_started: CounterVec,
    pub transactions_ended: CounterVec,
    pub transactions_ignored: CounterVec,
    pub apdex_ignored: CounterVec,
    pub custom_metrics: GaugeVec,
    pub custom_parameters: CounterVec,
    pub custom_events: CounterVec,
    pub auto_rum_disabled: CounterVec,
    pub errors: CounterVec,
}

impl AgentMetrics {
    /// Render all registered metrics plus any extra lines provided by callers.
    pub fn render(&self, extra: &[(&str, u64)]) -> String {
        let mut out = String::new();
        self.app_names.render("apmhook_app_name_sets_total", &mut out);
        self.transactions_named.render("apmhook_transactions_named_total", &mut out);
        self.transactions_started.render("apmhook_transactions_started_total", &mut out);
        self.transactions_ended.render("apmhook_transactions_ended_total", &mut out);
        self.transactions_ignored.render("apmhook_transactions_ignored_total", &mut out);
        self.apdex_ignored.render("apmhook_apdex_ignored_total", &mut out);
        self.custom_metrics.render("apmhook_custom_metric", &mut out);
        self.custom_parameters.render("apmhook_custom_parameters_total", &mut out);
        self.custom_events.render("apmhook_custom_events_total", &mut out);
        self.auto_rum_disabled.render("apmhook_auto_rum_disabled_total", &mut out);
        self.errors.render("apmhook_errors_total", &mut out);

        for (k, v) in extra {
            let _ = writeln!(out, "{} {}", k, v);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_order_insensitive() {
        let c = CounterVec::default();
        c.inc(&[("a", "1"), ("b", "2")]);
        c.inc(&[("b", "2"), ("a", "1")]);
        assert_eq!(c.get(&[("a", "1"), ("b", "2")]), 2);
    }

    #[test]
    fn render_escapes_and_sorts() {
        let m = AgentMetrics::default();
        m.transactions_named.inc(&[("name", "b\"q")]);
        m.transactions_named.inc(&[("name", "a")]);
        m.custom_metrics.set(&[("name", "load")], 4.7);
        let text = m.render(&[("apmhook_up", 1)]);
        assert!(text.contains("# TYPE apmhook_transactions_named_total counter\n"));
        assert!(text.contains(
            "apmhook_transactions_named_total{name=\"a\"} 1\napmhook_transactions_named_total{name=\"b\\\"q\"} 1\n"
        ));
        assert!(text.contains("apmhook_custom_metric{name=\"load\"} 4.7\n"));
        assert!(text.ends_with("apmhook_up 1\n"));
    }

    #[test]
    fn series_past_the_cap_fold_into_overflow() {
        let c = CounterVec::with_max_series(3);
        for i in 0..10 {
            c.inc(&[("name", &format!("GET /no/such/{i}"))]);
        }
        c.inc(&[("name", "GET /no/such/0")]);

        // three real series plus one overflow
        assert_eq!(c.series(), 4);
        assert_eq!(c.get(&[("name", "GET /no/such/0")]), 2);
        assert_eq!(c.get(&[("name", OVERFLOW_LABEL)]), 7);

        let g = GaugeVec::with_max_series(1);
        g.set(&[("name", "a")], 1.0);
        g.set(&[("name", "b")], 2.0);
        g.set(&[("name", "c")], 3.0);
        assert_eq!(g.series(), 2);
        assert_eq!(g.get(&[("name", OVERFLOW_LABEL)]), Some(3.0));
    }
}
