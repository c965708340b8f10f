#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;

use apmhook_core::{ApmInteractor, CustomData, ErrorKind};
use apmhook_http::template::{TimingExtension, TimingMarkers};

use common::mocks::{Call, RecordingInteractor};
use common::{FOOTER, HEADER};

fn markers(rec: &Arc<RecordingInteractor>, data: &CustomData, instrument: bool) -> TimingMarkers {
    TimingMarkers::new(rec.clone() as Arc<dyn ApmInteractor>, data.clone(), instrument)
}

#[test]
fn fresh_markers_are_unused() {
    let rec = Arc::new(RecordingInteractor::default());
    let m = markers(&rec, &CustomData::new(), true);
    assert!(!m.is_used());
    assert!(!m.is_header_called());
    assert!(!m.is_footer_called());
}

#[test]
fn header_flushes_metrics_and_parameters() {
    let rec = Arc::new(RecordingInteractor::default());
    let data = CustomData::new();
    data.add_metric("m", 1.0);
    data.add_parameter("p", true);
    data.add_event("E", Default::default());
    let m = markers(&rec, &data, true);

    assert_eq!(m.header().unwrap(), HEADER);
    assert!(m.is_used());
    assert!(m.is_header_called());
    assert_eq!(
        rec.calls(),
        vec![
            Call::DisableAutoRum,
            Call::CustomMetric("m".into(), 1.0),
            Call::CustomParameter("p".into(), true.into()),
            Call::TimingHeader,
        ]
    );
    // events stay for the response phase
    assert_eq!(data.drain_events().len(), 1);
}

#[test]
fn header_without_instrument_keeps_auto_rum() {
    let rec = Arc::new(RecordingInteractor::default());
    let m = markers(&rec, &CustomData::new(), false);
    m.header().unwrap();
    assert_eq!(rec.count(|c| *c == Call::DisableAutoRum), 0);
}

#[test]
fn header_twice_is_an_error() {
    let rec = Arc::new(RecordingInteractor::default());
    let m = markers(&rec, &CustomData::new(), true);
    m.header().unwrap();
    let err = m.header().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Template);
}

#[test]
fn footer_requires_header() {
    let rec = Arc::new(RecordingInteractor::default());
    let m = markers(&rec, &CustomData::new(), true);
    assert_eq!(m.footer().unwrap_err().kind(), ErrorKind::Template);
    assert!(!m.is_footer_called());

    m.header().unwrap();
    assert_eq!(m.footer().unwrap(), FOOTER);
    assert!(m.is_footer_called());
    assert_eq!(m.footer().unwrap_err().kind(), ErrorKind::Template);
}

#[test]
fn clones_share_state() {
    let rec = Arc::new(RecordingInteractor::default());
    let m = markers(&rec, &CustomData::new(), true);
    let handle = m.clone();
    handle.header().unwrap();
    assert!(m.is_header_called());
}
