//! Images and embed placeholders.
//!
//! Both stay network-free at render time. The image's error fallback is a
//! directive (`data-img-fallback="hide"`) for the host page's delegated
//! error listener, since an inline `onerror` handler would be stripped by
//! the gate, which allows no event-handler attributes. The embed emits an inert
//! placeholder node for the hydrator; live provider markup is never
//! constructed here.

use crate::render::{attr, caption_line};
use crate::schema::EmbedService;

pub fn image(src: &str, alt: Option<&str>, caption: Option<&str>) -> String {
    let mut out = format!(
        r#"<img src="{}" loading="lazy" data-img-fallback="hide""#,
        attr(src)
    );
    if let Some(alt) = alt {
        out.push_str(&format!(r#" alt="{}""#, attr(alt)));
    }
    out.push('>');
    out.push_str(&caption_line(caption));
    out
}

/// The placeholder carries everything the hydrator needs as `data-*`
/// attributes; all of them are on the gate's allow-list.
pub fn embed_placeholder(
    service: EmbedService,
    source_url: &str,
    embed_url: Option<&str>,
    caption: Option<&str>,
) -> String {
    let mut out = format!(
        r#"<div class="embed-placeholder" data-embed-service="{}" data-embed-source="{}""#,
        service.as_str(),
        attr(source_url)
    );
    if let Some(embed_url) = embed_url {
        out.push_str(&format!(r#" data-embed-url="{}""#, attr(embed_url)));
    }
    if let Some(caption) = caption {
        out.push_str(&format!(r#" data-embed-caption="{}""#, attr(caption)));
    }
    out.push_str("></div>");
    out
}
