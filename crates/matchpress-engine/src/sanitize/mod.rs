//! # Sanitization Gate
//!
//! The single security boundary between rendered markup and the page. Every
//! fragment the pipeline produces passes through here, and the concatenated
//! document passes through once more before it is returned.
//!
//! Policy: an explicit allow-list of tags and per-tag attributes (see
//! [`policy`]). A disallowed tag is unwrapped (children kept, tag removed);
//! a disallowed attribute is dropped (element kept). `iframe` survives only
//! when its `src` points at a known embed provider. The gate always yields
//! some safe output rather than failing.

mod policy;

use kuchiki::traits::TendrilSink;
use kuchiki::{ElementData, NodeData, NodeRef};
use url::Url;

use crate::hydrate::providers;
use crate::inline::is_allowed_url;

/// Reduces an HTML fragment to allow-listed markup.
///
/// Output carries no `<script>` content, no inline event-handler attributes
/// and no `javascript:` URLs. Running the gate over its own output is a
/// fixed point.
pub fn sanitize_fragment(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let document = kuchiki::parse_html().one(html);
    let Ok(body) = document.select_first("body") else {
        return String::new();
    };

    // Collect before mutating; unwrapped children stay in the tree and are
    // still visited in document order.
    let nodes: Vec<NodeRef> = body.as_node().descendants().collect();
    for node in nodes {
        match node.data() {
            NodeData::Comment(_) | NodeData::ProcessingInstruction(_) | NodeData::Doctype(_) => {
                node.detach();
            }
            NodeData::Element(el) => {
                let tag = el.name.local.as_ref().to_ascii_lowercase();
                if !policy::tag_allowed(&tag) {
                    log::debug!("sanitizer unwrapped disallowed tag <{tag}>");
                    unwrap_element(&node);
                    continue;
                }
                scrub_attributes(&tag, el);
                if tag == "iframe" && !iframe_src_allowed(el) {
                    log::debug!("sanitizer removed iframe with non-provider src");
                    unwrap_element(&node);
                }
            }
            _ => {}
        }
    }

    let mut out = String::new();
    for child in body.as_node().children() {
        out.push_str(&child.to_string());
    }
    out
}

/// Removes a node, keeping its children in place.
fn unwrap_element(node: &NodeRef) {
    let mut child = node.first_child();
    while let Some(current) = child {
        child = current.next_sibling();
        node.insert_before(current);
    }
    node.detach();
}

fn scrub_attributes(tag: &str, el: &ElementData) {
    let mut attrs = el.attributes.borrow_mut();

    let names: Vec<_> = attrs.map.keys().cloned().collect();
    for name in names {
        let local = name.local.as_ref().to_ascii_lowercase();
        if !policy::attr_allowed(tag, &local) {
            log::debug!("sanitizer dropped attribute {local} on <{tag}>");
            attrs.map.remove(&name);
        }
    }

    // Placeholder data attributes carry URLs the hydrator will act on later,
    // so they get the same scheme policy as href/src.
    for url_attr in ["href", "src", "data-embed-source", "data-embed-url"] {
        if let Some(value) = attrs.get(url_attr).map(str::to_owned)
            && !is_allowed_url(&value)
        {
            attrs.remove(url_attr);
        }
    }

    if let Some(style) = attrs.get("style").map(str::to_owned) {
        match policy::filter_style(&style) {
            Some(filtered) => {
                attrs.insert("style", filtered);
            }
            None => {
                attrs.remove("style");
            }
        }
    }
}

/// Embed iframes must point at a known provider over http(s). The host list
/// is owned by the hydrator's provider table.
fn iframe_src_allowed(el: &ElementData) -> bool {
    let attrs = el.attributes.borrow();
    let Some(src) = attrs.get("src") else {
        return false;
    };
    embed_host_allowed(src)
}

pub(crate) fn embed_host_allowed(src: &str) -> bool {
    let Ok(url) = Url::parse(src) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    providers::IFRAME_HOSTS.iter().any(|allowed| *allowed == host)
}
