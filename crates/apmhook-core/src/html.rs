//! HTML timing marker splicing.
//!
//! Markers go right after the first `<head>` and right before the first
//! `</body>`. Both tags are matched as exact, case-sensitive byte sequences;
//! a missing tag skips that side silently.

use bytes::Bytes;

const HEAD_OPEN: &[u8] = b"<head>";
const BODY_CLOSE: &[u8] = b"</body>";

/// Whether a `Content-Type` value designates an HTML document.
///
/// Accepts `text/html` in any case, optionally followed by parameters
/// (`text/html; charset=UTF-8`).
pub fn is_html_content_type(value: &str) -> bool {
    let essence = value.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("text/html")
}

/// Which markers the caller wants spliced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub header: bool,
    pub footer: bool,
}

impl Placement {
    pub fn both() -> Self {
        Self { header: true, footer: true }
    }

    pub fn is_empty(self) -> bool {
        !self.header && !self.footer
    }
}

/// Splice timing markers into `body`.
///
/// `header` and `footer` are only invoked when their tag is present and the
/// placement asks for them, so agents are not queried needlessly. Returns
/// `None` when nothing changed.
pub fn inject_timing<H, F>(body: &[u8], placement: Placement, header: H, footer: F) -> Option<Bytes>
where
    H: FnOnce() -> String,
    F: FnOnce() -> String,
{
    let head_at = if placement.header { find(body, HEAD_OPEN).map(|i| i + HEAD_OPEN.len()) } else { None };
    let body_at = if placement.footer { find(body, BODY_CLOSE) } else { None };

    let head_marker = head_at.map(|i| (i, header()));
    let body_marker = body_at.map(|i| (i, footer()));

    let mut inserts: Vec<(usize, String)> = head_marker
        .into_iter()
        .chain(body_marker)
        .filter(|(_, m)| !m.is_empty())
        .collect();
    if inserts.is_empty() {
        return None;
    }
    inserts.sort_by_key(|(at, _)| *at);

    let extra: usize = inserts.iter().map(|(_, m)| m.len()).sum();
    let mut out = Vec::with_capacity(body.len() + extra);
    let mut cursor = 0;
    for (at, marker) in inserts {
        out.extend_from_slice(&body[cursor..at]);
        out.extend_from_slice(marker.as_bytes());
        cursor = at;
    }
    out.extend_from_slice(&body[cursor..]);
    Some(Bytes::from(out))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
