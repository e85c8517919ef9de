//! # Reference Resolver
//!
//! Validates inline references (hyperlinks) inside the restricted inline
//! markup carried by textual blocks. Purely syntactic, no network access.
//!
//! Inline markup is plain text interleaved with `<b> <i> <strong> <em> <a>`
//! tags. The resolver only polices anchor targets: a hyperlink whose scheme
//! is not on the allow-list is downgraded to plain text (open and matching
//! close tag dropped, inner text kept). Everything else passes through
//! byte-for-byte; the sanitization gate is the security boundary for
//! whatever remains.

use regex::Regex;
use std::sync::OnceLock;

/// URL schemes a hyperlink may carry. Scheme-less (relative) targets are
/// also accepted.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Resolves inline markup, returning the input unchanged when compliant.
///
/// Anchors with a disallowed target scheme are dropped together with their
/// matching close tag. Close tags are matched by nesting depth, so a
/// downgraded anchor never swallows a sibling anchor's close tag.
pub fn resolve_inline(text: &str) -> String {
    if !text.contains('<') {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut dropped_anchors = 0usize;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt..];

        let Some(gt) = tail.find('>') else {
            // Stray '<' with no close; literal text from here on.
            out.push_str(tail);
            return out;
        };
        let tag = &tail[..=gt];

        if is_anchor_open(tag) {
            match href_value(tag) {
                Some(href) if !is_allowed_url(href) => {
                    log::debug!("downgraded hyperlink with disallowed target");
                    dropped_anchors += 1;
                }
                _ => out.push_str(tag),
            }
        } else if is_anchor_close(tag) {
            if dropped_anchors > 0 {
                dropped_anchors -= 1;
            } else {
                out.push_str(tag);
            }
        } else {
            out.push_str(tag);
        }
        rest = &tail[gt + 1..];
    }

    out.push_str(rest);
    out
}

/// Scheme policy shared with the sanitization gate's `href`/`src` checks.
///
/// Obfuscation via embedded whitespace or control bytes is stripped before
/// the scheme is read, so `jav\tascript:` does not slip through.
pub(crate) fn is_allowed_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_ascii_control())
        .collect();

    match cleaned.split_once(':') {
        None => true,
        Some((scheme, _)) => {
            // A ':' after a path/query/fragment separator is not a scheme
            // delimiter (e.g. "matches/today:live").
            if scheme.contains(['/', '?', '#']) {
                return true;
            }
            let scheme = scheme.to_ascii_lowercase();
            ALLOWED_SCHEMES.contains(&scheme.as_str())
        }
    }
}

/// True for `<a ...>` open tags (and only those).
fn is_anchor_open(tag: &str) -> bool {
    let bytes = tag.as_bytes();
    if bytes.len() < 3 || !matches!(bytes[1], b'a' | b'A') {
        return false;
    }
    matches!(bytes[2], b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/')
}

/// True for `</a>` close tags, tolerating trailing whitespace.
fn is_anchor_close(tag: &str) -> bool {
    let Some(inner) = tag.strip_prefix("</") else {
        return false;
    };
    let Some(inner) = inner.strip_suffix('>') else {
        return false;
    };
    let mut chars = inner.chars();
    matches!(chars.next(), Some('a') | Some('A')) && chars.all(char::is_whitespace)
}

/// Extracts the `href` value from an anchor open tag.
fn href_value(tag: &str) -> Option<&str> {
    static HREF: OnceLock<Regex> = OnceLock::new();
    let re = HREF.get_or_init(|| {
        Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
            .expect("href pattern is valid")
    });
    let caps = re.captures(tag)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
}
