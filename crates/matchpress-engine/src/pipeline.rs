//! # Document Pipeline
//!
//! The externally-callable entry point: decode → render blocks in order →
//! sanitize each fragment → concatenate → sanitize once more. Fully
//! synchronous and deterministic; the input is never mutated and identical
//! input always yields identical output.

use crate::render::render_block;
use crate::sanitize::sanitize_fragment;
use crate::schema::{self, DecodeError, Document};

/// Renders a raw JSON document to a single sanitized HTML string.
///
/// Only a malformed top-level envelope is fatal; block-level problems are
/// contained where they arise and the rest of the document still renders.
/// The error carries enough to log, never to show: callers surface a fixed
/// "content unavailable" message instead.
pub fn render_document(raw: &str) -> Result<String, DecodeError> {
    let document = schema::decode_document(raw)?;
    Ok(render_blocks(&document))
}

/// Fragment-by-fragment rendering with the double pass through the gate:
/// each fragment individually, then the concatenation as a whole. Defense
/// in depth against any single render rule emitting something unsafe.
fn render_blocks(document: &Document) -> String {
    let mut out = String::new();
    for block in &document.blocks {
        let fragment = render_block(block);
        if fragment.is_empty() {
            continue;
        }
        let clean = sanitize_fragment(&fragment.html);
        if !clean.is_empty() {
            out.push_str(&clean);
            out.push('\n');
        }
    }
    sanitize_fragment(&out)
}

/// Caller-facing classification of a render, per the output contract:
/// distinct channels for "no content" and "decode failed", each mapped by
/// the caller to a fixed non-technical localized message.
#[derive(Debug)]
pub enum RenderOutcome {
    Rendered(String),
    Empty,
    Unavailable(DecodeError),
}

pub fn render_article(raw: &str) -> RenderOutcome {
    match render_document(raw) {
        Ok(html) if html.trim().is_empty() => RenderOutcome::Empty,
        Ok(html) => RenderOutcome::Rendered(html),
        Err(err) => {
            log::warn!("article body unavailable: {err}");
            RenderOutcome::Unavailable(err)
        }
    }
}
