//! Preview data that can be derived from a link without fetching anything.

use url::{Origin, Url};

use super::types::LinkPreview;
use crate::constants::FAVICON_PATH;

/// Compute the fallback preview for a link.
///
/// Returns `None` when the link does not parse as a URL or has no host.
#[must_use]
pub fn fallback_preview(link: &str) -> Option<LinkPreview> {
    let url = Url::parse(link).ok()?;
    let hostname = display_host(&url)?;

    Some(LinkPreview {
        title: hostname.clone(),
        hostname,
        description: None,
        favicon_url: default_favicon(&url),
    })
}

/// Best-effort label for a link, used when no preview card can be shown.
///
/// Unparsable strings come back unchanged.
#[must_use]
pub fn site_label(link: &str) -> String {
    Url::parse(link)
        .ok()
        .and_then(|url| display_host(&url))
        .unwrap_or_else(|| link.to_string())
}

/// `<origin>/favicon.ico`, or `None` for URLs with an opaque origin.
#[must_use]
pub fn default_favicon(url: &Url) -> Option<String> {
    match url.origin() {
        origin @ Origin::Tuple(..) => {
            Some(format!("{}{FAVICON_PATH}", origin.ascii_serialization()))
        }
        Origin::Opaque(_) => None,
    }
}

fn display_host(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}
