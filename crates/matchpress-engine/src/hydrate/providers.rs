//! Provider-specific embed rules: iframe hosts, embed URL derivation,
//! author-handle extraction and the deterministic fallback card.

use url::Url;

use super::{EmbedError, EmbedRequest};
use crate::render::attr;
use crate::schema::EmbedService;

/// Hosts an embed iframe may point at. The sanitization gate's iframe
/// allow-list reads this table, keeping the two in lock-step.
pub const IFRAME_HOSTS: [&str; 6] = [
    "www.youtube.com",
    "www.youtube-nocookie.com",
    "player.vimeo.com",
    "platform.twitter.com",
    "www.instagram.com",
    "instagram.com",
];

/// Builds the live embed markup for a placeholder, or reports that no embed
/// URL can be computed.
pub fn embed_markup(request: &EmbedRequest) -> Result<String, EmbedError> {
    let url = embed_url(request)?;
    Ok(format!(
        r#"<iframe class="embed-frame embed-frame-{}" src="{}" loading="lazy" allowfullscreen></iframe>"#,
        request.service.as_str(),
        attr(&url)
    ))
}

/// The URL to frame: the placeholder's explicit `embedUrl` when it points at
/// a known provider host, otherwise deterministically derived from
/// `sourceUrl`.
pub fn embed_url(request: &EmbedRequest) -> Result<String, EmbedError> {
    if let Some(explicit) = &request.embed_url
        && crate::sanitize::embed_host_allowed(explicit)
    {
        return Ok(explicit.clone());
    }
    derive_embed_url(request.service, &request.source_url)
        .ok_or_else(|| EmbedError::UnrecognizedSource(request.source_url.clone()))
}

/// Provider-branded fallback card: author handle when derivable, the caption
/// when present, and an outbound link to the original post when its URL
/// passes the hyperlink scheme policy. A pure function of
/// `{service, source_url, caption}`.
pub fn fallback_card(request: &EmbedRequest) -> String {
    let mut out = format!(
        r#"<div class="embed-fallback embed-fallback-{}">"#,
        request.service.as_str()
    );
    if let Some(handle) = author_handle(request.service, &request.source_url) {
        out.push_str(&format!(
            r#"<span class="embed-author">@{}</span>"#,
            html_escape::encode_text(&handle)
        ));
    }
    if let Some(caption) = &request.caption
        && !caption.is_empty()
    {
        out.push_str(&format!(
            r#"<p class="embed-caption">{}</p>"#,
            html_escape::encode_text(caption)
        ));
    }
    if crate::inline::is_allowed_url(&request.source_url) {
        let link_text = Url::parse(&request.source_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_owned))
            .unwrap_or_else(|| request.service.as_str().to_owned());
        out.push_str(&format!(
            r#"<a class="embed-source-link" href="{}">{}</a>"#,
            attr(&request.source_url),
            html_escape::encode_text(&link_text)
        ));
    }
    out.push_str("</div>");
    out
}

/// Extracts the author handle from a source URL; `None` when the URL shape
/// doesn't carry one. The handle segment only counts when the URL's actual
/// host belongs to the provider, so a handle-shaped path on a foreign host
/// yields nothing.
pub fn author_handle(service: EmbedService, source_url: &str) -> Option<String> {
    let url = Url::parse(source_url).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    match service {
        EmbedService::Twitter if host == "twitter.com" || host == "x.com" => {
            match segments.as_slice() {
                [user, "status", ..] if is_twitter_handle(user) => Some((*user).to_owned()),
                _ => None,
            }
        }
        EmbedService::Instagram if host == "instagram.com" => match segments.as_slice() {
            [user, "p" | "reel" | "tv", ..] if is_instagram_handle(user) => {
                Some((*user).to_owned())
            }
            _ => None,
        },
        _ => None,
    }
}

fn is_twitter_handle(s: &str) -> bool {
    (1..=15).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn is_instagram_handle(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
}

fn derive_embed_url(service: EmbedService, source_url: &str) -> Option<String> {
    let url = Url::parse(source_url).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    match service {
        EmbedService::Youtube => {
            let id = match host {
                "youtube.com" => match segments.as_slice() {
                    ["watch"] => url
                        .query_pairs()
                        .find(|(k, _)| k == "v")
                        .map(|(_, v)| v.into_owned()),
                    ["shorts", id] => Some((*id).to_owned()),
                    _ => None,
                },
                "youtu.be" => segments.first().map(|s| (*s).to_owned()),
                _ => None,
            }?;
            ascii_id(&id)?;
            Some(format!("https://www.youtube.com/embed/{id}"))
        }
        EmbedService::Vimeo => {
            if host != "vimeo.com" {
                return None;
            }
            let id = segments.first()?;
            if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            Some(format!("https://player.vimeo.com/video/{id}"))
        }
        EmbedService::Twitter => {
            if host != "twitter.com" && host != "x.com" {
                return None;
            }
            match segments.as_slice() {
                [_user, "status", id] if id.bytes().all(|b| b.is_ascii_digit()) && !id.is_empty() => {
                    Some(format!("https://platform.twitter.com/embed/Tweet.html?id={id}"))
                }
                _ => None,
            }
        }
        EmbedService::Instagram => {
            if host != "instagram.com" {
                return None;
            }
            // Both /p/CODE and /{user}/p/CODE shapes occur in the wild.
            let (kind, code) = match segments.as_slice() {
                [kind @ ("p" | "reel" | "tv"), code] => (*kind, *code),
                [_user, kind @ ("p" | "reel" | "tv"), code] => (*kind, *code),
                _ => return None,
            };
            ascii_id(code)?;
            Some(format!("https://www.instagram.com/{kind}/{code}/embed"))
        }
        EmbedService::Other => None,
    }
}

/// Provider IDs are alphanumeric plus `-` and `_`; anything else means the
/// URL shape wasn't what we expected.
fn ascii_id(id: &str) -> Option<()> {
    (!id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'))
        .then_some(())
}
