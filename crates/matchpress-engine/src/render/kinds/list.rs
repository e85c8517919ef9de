//! Ordered and unordered lists.

use crate::inline::resolve_inline;

pub fn list(items: &[String], ordered: bool) -> String {
    let tag = if ordered { "ol" } else { "ul" };
    let mut out = format!("<{tag}>");
    for item in items {
        out.push_str("<li>");
        out.push_str(&resolve_inline(item));
        out.push_str("</li>");
    }
    out.push_str(&format!("</{tag}>"));
    out
}
