//! Textual kinds: paragraph, header, quote, warning.

use crate::inline::resolve_inline;
use crate::render::caption_line;

pub fn paragraph(text: &str, caption: Option<&str>) -> String {
    format!("<p>{}</p>{}", resolve_inline(text), caption_line(caption))
}

/// Header level is clamped to 1..=6; the upstream editor writes 2 when the
/// author never picked one, so absent means 2 here too.
pub fn header(text: &str, level: Option<i64>, caption: Option<&str>) -> String {
    let level = level.unwrap_or(2).clamp(1, 6);
    format!(
        "<h{level}>{}</h{level}>{}",
        resolve_inline(text),
        caption_line(caption)
    )
}

pub fn quote(text: &str, caption: Option<&str>) -> String {
    format!(
        "<blockquote>{}</blockquote>{}",
        resolve_inline(text),
        caption_line(caption)
    )
}

pub fn warning(text: &str, caption: Option<&str>) -> String {
    format!(
        r#"<div class="warning">{}</div>{}"#,
        resolve_inline(text),
        caption_line(caption)
    )
}
