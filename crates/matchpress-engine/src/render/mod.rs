//! # Block Renderer
//!
//! Maps each block kind to a markup fragment. Pure and synchronous: embeds
//! render as inert placeholders (never live third-party markup), images are
//! directives only, and no block failure can abort its neighbors.
//!
//! Fragments produced here are *candidates*; the sanitization gate has the
//! final word on what reaches the page.

pub mod kinds;

use crate::schema::Block;

/// The sanitizable output of one block. Fragments are concatenated in
/// document order, never nested across blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFragment {
    pub html: String,
}

impl RenderedFragment {
    fn new(html: String) -> Self {
        Self { html }
    }

    fn empty() -> Self {
        Self {
            html: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// Renders one block. Exhaustive over every kind; `Unknown` (and anything
/// degraded to it upstream) contributes its caption or nothing.
pub fn render_block(block: &Block) -> RenderedFragment {
    match block {
        Block::Paragraph { text, caption } => {
            RenderedFragment::new(kinds::text::paragraph(text, caption.as_deref()))
        }
        Block::Header {
            text,
            level,
            caption,
        } => RenderedFragment::new(kinds::text::header(text, *level, caption.as_deref())),
        Block::Quote { text, caption } => {
            RenderedFragment::new(kinds::text::quote(text, caption.as_deref()))
        }
        Block::Warning { text, caption } => {
            RenderedFragment::new(kinds::text::warning(text, caption.as_deref()))
        }
        Block::List { items, ordered } => RenderedFragment::new(kinds::list::list(items, *ordered)),
        Block::Table { rows, has_header } => {
            RenderedFragment::new(kinds::table::table(rows, *has_header))
        }
        Block::Image { src, alt, caption } => {
            RenderedFragment::new(kinds::media::image(src, alt.as_deref(), caption.as_deref()))
        }
        Block::Embed {
            service,
            source_url,
            embed_url,
            caption,
        } => RenderedFragment::new(kinds::media::embed_placeholder(
            *service,
            source_url,
            embed_url.as_deref(),
            caption.as_deref(),
        )),
        Block::Delimiter => RenderedFragment::new("<hr>".to_string()),
        // Untrusted by definition; the gate sanitizes it like everything else.
        Block::Raw { html } => RenderedFragment::new(html.clone()),
        Block::Unknown { caption } => match caption {
            Some(caption) => RenderedFragment::new(caption_line(Some(caption))),
            None => RenderedFragment::empty(),
        },
    }
}

/// Trailing styled caption line shared by several kinds.
pub(crate) fn caption_line(caption: Option<&str>) -> String {
    match caption {
        Some(caption) if !caption.is_empty() => {
            format!(
                r#"<div class="caption">{}</div>"#,
                html_escape::encode_text(caption)
            )
        }
        _ => String::new(),
    }
}

pub(crate) fn attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}
