//! Per-request custom data buffer.
//!
//! Application code appends custom metrics, parameters and events while a
//! request is handled; the response phase drains everything once and forwards
//! it to the agent. Every collection keeps insertion order, and re-adding an
//! existing name overwrites the value in place.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Attribute map of one custom event instance (insertion ordered).
pub type EventAttributes = serde_json::Map<String, serde_json::Value>;

/// Scalar value of a custom parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

/// Everything buffered for one request, in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Drained {
    pub metrics: Vec<(String, f64)>,
    pub parameters: Vec<(String, ParamValue)>,
    pub events: Vec<(String, Vec<EventAttributes>)>,
}

impl Drained {
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty() && self.parameters.is_empty() && self.events.is_empty()
    }
}

/// Shared handle to a request's buffer. Cloning shares the same storage.
#[derive(Debug, Clone, Default)]
pub struct CustomData {
    inner: Arc<Mutex<Drained>>,
}

impl CustomData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a custom metric; an existing name keeps its position.
    pub fn add_metric(&self, name: impl Into<String>, value: f64) {
        let name = name.into();
        if let Some(mut g) = self.lock() {
            upsert(&mut g.metrics, name, value);
        }
    }

    /// Record a custom parameter; an existing name keeps its position.
    pub fn add_parameter(&self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(mut g) = self.lock() {
            upsert(&mut g.parameters, name, value);
        }
    }

    /// Append one instance of a custom event type.
    pub fn add_event(&self, event_type: impl Into<String>, attributes: EventAttributes) {
        let event_type = event_type.into();
        if let Some(mut g) = self.lock() {
            match g.events.iter_mut().find(|(t, _)| *t == event_type) {
                Some((_, list)) => list.push(attributes),
                None => g.events.push((event_type, vec![attributes])),
            }
        }
    }

    /// Take the buffered metrics, leaving parameters and events in place.
    pub fn drain_metrics(&self) -> Vec<(String, f64)> {
        self.lock().map(|mut g| std::mem::take(&mut g.metrics)).unwrap_or_default()
    }

    /// Take the buffered parameters, leaving metrics and events in place.
    pub fn drain_parameters(&self) -> Vec<(String, ParamValue)> {
        self.lock().map(|mut g| std::mem::take(&mut g.parameters)).unwrap_or_default()
    }

    /// Take the buffered events, leaving metrics and parameters in place.
    pub fn drain_events(&self) -> Vec<(String, Vec<EventAttributes>)> {
        self.lock().map(|mut g| std::mem::take(&mut g.events)).unwrap_or_default()
    }

    /// Take everything buffered so far.
    pub fn drain(&self) -> Drained {
        self.lock().map(|mut g| std::mem::take(&mut *g)).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().map(|g| g.is_empty()).unwrap_or(true)
    }

    fn lock(&self) -> Option<MutexGuard<'_, Drained>> {
        // Poisoned lock means a handler panicked mid-write; drop the data
        // rather than propagate the panic into the response phase.
        match self.inner.lock() {
            Ok(g) => Some(g),
            Err(_) => {
                tracing::warn!("custom data buffer poisoned; dropping buffered data");
                None
            }
        }
    }
}

fn upsert<V>(entries: &mut Vec<(String, V)>, name: String, value: V) {
    match entries.iter_mut().find(|(n, _)| *n == name) {
        Some((_, slot)) => *slot = value,
        None => entries.push((name, value)),
    }
}
