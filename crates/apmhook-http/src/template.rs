//! Template-side timing markers.
//!
//! HTML handlers that render their own layout can place the browser timing
//! header and footer inline. The response listener then sees, through
//! `TimingExtension`, which markers were already rendered and skips them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use apmhook_core::error::{ApmError, Result};
use apmhook_core::{ApmInteractor, CustomData};

/// What the response listener needs to know about inline rendering.
pub trait TimingExtension: Send + Sync {
    fn is_used(&self) -> bool;
    fn is_header_called(&self) -> bool;
    fn is_footer_called(&self) -> bool;
}

/// Per-request handle, extracted by handlers with `Extension<TimingMarkers>`.
#[derive(Clone)]
pub struct TimingMarkers {
    inner: Arc<MarkersInner>,
}

struct MarkersInner {
    interactor: Arc<dyn ApmInteractor>,
    data: CustomData,
    instrument: bool,
    header_called: AtomicBool,
    footer_called: AtomicBool,
}

impl TimingMarkers {
    pub fn new(interactor: Arc<dyn ApmInteractor>, data: CustomData, instrument: bool) -> Self {
        Self {
            inner: Arc::new(MarkersInner {
                interactor,
                data,
                instrument,
                header_called: AtomicBool::new(false),
                footer_called: AtomicBool::new(false),
            }),
        }
    }

    /// Render the timing header. Metrics and parameters buffered so far are
    /// flushed first so they land on the transaction before it is sampled.
    pub fn header(&self) -> Result<String> {
        if self.inner.header_called.swap(true, Ordering::AcqRel) {
            return Err(ApmError::Template("timing header already rendered"));
        }
        let i = &self.inner.interactor;
        if self.inner.instrument {
            i.disable_auto_rum();
        }
        for (name, value) in self.inner.data.drain_metrics() {
            i.add_custom_metric(&name, value);
        }
        for (name, value) in self.inner.data.drain_parameters() {
            i.add_custom_parameter(&name, &value);
        }
        Ok(i.browser_timing_header())
    }

    /// Render the timing footer; the header must come first.
    pub fn footer(&self) -> Result<String> {
        if !self.inner.header_called.load(Ordering::Acquire) {
            return Err(ApmError::Template("timing footer rendered before header"));
        }
        if self.inner.footer_called.swap(true, Ordering::AcqRel) {
            return Err(ApmError::Template("timing footer already rendered"));
        }
        Ok(self.inner.interactor.browser_timing_footer())
    }
}

impl TimingExtension for TimingMarkers {
    fn is_used(&self) -> bool {
        self.is_header_called() || self.is_footer_called()
    }

    fn is_header_called(&self) -> bool {
        self.inner.header_called.load(Ordering::Acquire)
    }

    fn is_footer_called(&self) -> bool {
        self.inner.footer_called.load(Ordering::Acquire)
    }
}
