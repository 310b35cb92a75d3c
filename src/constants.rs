//! Shared constants used across the crate.

/// User agent string used for preview fetches.
///
/// Some readability proxies refuse obvious bot user agents, so previews are
/// requested with a regular desktop browser string.
pub const PREVIEW_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Readability proxy used when `PREVIEW_PROXY_URL` is not set.
///
/// The target URL is appended verbatim to this base.
pub const DEFAULT_PROXY_URL: &str = "https://r.jina.ai/";

/// Path of the conventional favicon relative to a site origin.
pub const FAVICON_PATH: &str = "/favicon.ico";
