//! Link preview cards for post links.
//!
//! A preview is computed in two phases: a fallback derived from the URL alone,
//! available synchronously, and an enrichment fetched and parsed from the
//! linked document. The resolver merges the two and guarantees that an
//! enrichment is only ever shown for the link it was computed for.

mod extract;
mod fallback;
mod fetcher;
mod resolver;
mod types;

pub use extract::extract_enrichment;
pub use fallback::{default_favicon, fallback_preview, site_label};
pub use fetcher::{DocumentFetcher, FetchError, ProxyFetcher};
pub use resolver::{resolve, PreviewResolver};
pub use types::{Enrichment, LinkPreview};
