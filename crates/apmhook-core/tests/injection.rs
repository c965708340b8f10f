//! Timing marker splicing against literal HTML documents.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::cell::Cell;

use apmhook_core::html::{inject_timing, Placement};

const HEADER: &str = "__Timing_Header__";
const FOOTER: &str = "__Timing_Footer__";

fn inject(body: &str, placement: Placement) -> Option<String> {
    inject_timing(body.as_bytes(), placement, || HEADER.to_string(), || FOOTER.to_string())
        .map(|b| String::from_utf8(b.to_vec()).unwrap())
}

#[test]
fn header_after_head_open() {
    assert_eq!(
        inject("<head><title /></head>", Placement::both()).as_deref(),
        Some("<head>__Timing_Header__<title /></head>")
    );
}

#[test]
fn footer_before_body_close() {
    assert_eq!(
        inject("<body><div /></body>", Placement::both()).as_deref(),
        Some("<body><div />__Timing_Footer__</body>")
    );
}

#[test]
fn header_and_footer_together() {
    assert_eq!(
        inject("<head><title /></head><body><div /></body>", Placement::both()).as_deref(),
        Some("<head>__Timing_Header__<title /></head><body><div />__Timing_Footer__</body>")
    );
}

#[test]
fn lookalike_tags_are_left_alone() {
    for body in ["content", "<div class=\"head\">head</div>", "<header>content</header>"] {
        assert_eq!(inject(body, Placement::both()), None, "body: {body}");
    }
}

#[test]
fn tag_match_is_case_sensitive() {
    assert_eq!(inject("<HEAD></HEAD><BODY></BODY>", Placement::both()), None);
}

#[test]
fn only_first_occurrence_is_used() {
    assert_eq!(
        inject("<head></head><head></head>", Placement::both()).as_deref(),
        Some("<head>__Timing_Header__</head><head></head>")
    );
}

#[test]
fn placement_restricts_sides() {
    let doc = "<head></head><body></body>";
    assert_eq!(
        inject(doc, Placement { header: false, footer: true }).as_deref(),
        Some("<head></head><body>__Timing_Footer__</body>")
    );
    assert_eq!(
        inject(doc, Placement { header: true, footer: false }).as_deref(),
        Some("<head>__Timing_Header__</head><body></body>")
    );
    assert_eq!(inject(doc, Placement { header: false, footer: false }), None);
}

#[test]
fn markers_fetched_only_when_needed() {
    let header_calls = Cell::new(0);
    let footer_calls = Cell::new(0);
    let out = inject_timing(
        b"<head></head>",
        Placement::both(),
        || {
            header_calls.set(header_calls.get() + 1);
            "H".to_string()
        },
        || {
            footer_calls.set(footer_calls.get() + 1);
            "F".to_string()
        },
    );
    assert_eq!(out.unwrap().as_ref(), b"<head>H</head>");
    assert_eq!(header_calls.get(), 1);
    assert_eq!(footer_calls.get(), 0);
}

#[test]
fn empty_marker_means_unchanged() {
    let out = inject_timing(b"<head></head>", Placement::both(), String::new, String::new);
    assert!(out.is_none());
}
