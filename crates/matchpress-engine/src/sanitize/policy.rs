//! Allow-list tables for the sanitization gate.
//!
//! The iframe host list lives with the embed providers
//! (`crate::hydrate::providers`) so the gate and the hydrator stay in
//! lock-step over which third parties may be framed.

/// Tags that may appear in rendered output. Anything else is unwrapped.
pub(crate) const ALLOWED_TAGS: [&str; 27] = [
    "p", "a", "b", "i", "strong", "em", "ul", "ol", "li", "table", "thead", "tbody", "tr", "td",
    "th", "blockquote", "img", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "div", "span", "iframe",
];

/// The only `data-*` attributes allowed through: the embed placeholder
/// contract plus the image error-fallback directive.
pub(crate) const PLACEHOLDER_DATA_ATTRS: [&str; 5] = [
    "data-embed-service",
    "data-embed-source",
    "data-embed-url",
    "data-embed-caption",
    "data-img-fallback",
];

/// CSS properties an inline `style` may set. `direction` is load-bearing for
/// the Arabic reading pages.
const SAFE_STYLE_PROPS: [&str; 7] = [
    "text-align",
    "direction",
    "width",
    "max-width",
    "height",
    "float",
    "margin",
];

pub(crate) fn tag_allowed(tag: &str) -> bool {
    ALLOWED_TAGS.contains(&tag)
}

/// Per-tag attribute policy. `attr` is already lowercase.
pub(crate) fn attr_allowed(tag: &str, attr: &str) -> bool {
    match attr {
        "title" | "class" | "style" => true,
        "href" => tag == "a",
        "src" => tag == "img" || tag == "iframe",
        "alt" => tag == "img",
        "loading" => tag == "img" || tag == "iframe",
        "allowfullscreen" => tag == "iframe",
        _ if attr.starts_with("data-") => PLACEHOLDER_DATA_ATTRS.contains(&attr),
        _ => false,
    }
}

/// Filters an inline style down to the safe property subset.
///
/// Returns `None` when nothing survives. Values carrying `url(` or
/// `expression` are dropped regardless of property.
pub(crate) fn filter_style(value: &str) -> Option<String> {
    let mut kept = Vec::new();
    for declaration in value.split(';') {
        let Some((prop, val)) = declaration.split_once(':') else {
            continue;
        };
        let prop = prop.trim().to_ascii_lowercase();
        let val = val.trim();
        if !SAFE_STYLE_PROPS.contains(&prop.as_str()) {
            continue;
        }
        let lowered = val.to_ascii_lowercase();
        if lowered.contains("url(") || lowered.contains("expression") {
            continue;
        }
        kept.push(format!("{prop}: {val}"));
    }
    if kept.is_empty() {
        None
    } else {
        Some(kept.join("; "))
    }
}
