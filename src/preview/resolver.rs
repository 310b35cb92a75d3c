//! Reactive link preview resolution.
//!
//! [`PreviewResolver`] is keyed on the active link. Changing the link swaps
//! the fallback synchronously and restarts the enrichment attempt; the attempt
//! for the previous link is cancelled before the new one is spawned.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info};

use super::extract::extract_enrichment;
use super::fallback::{fallback_preview, site_label};
use super::fetcher::{DocumentFetcher, FetchError, ProxyFetcher};
use super::types::{Enrichment, LinkPreview};
use crate::config::Config;

/// Resolve the preview to display for `link`.
///
/// This is the pure half of the resolver: the fallback for the link, overlaid
/// with `enrichment` if and only if it was computed for this exact link.
#[must_use]
pub fn resolve(link: Option<&str>, enrichment: Option<&Enrichment>) -> Option<LinkPreview> {
    let link = link?;
    fallback_preview(link).map(|fallback| fallback.merged(link, enrichment))
}

/// An in-flight enrichment attempt.
///
/// Dropping it cancels the attempt's token.
struct Attempt {
    link: String,
    _guard: DropGuard,
    handle: Option<JoinHandle<()>>,
}

/// Owns the preview for one view's active link.
///
/// Enrichment attempts are spawned onto the current Tokio runtime, so
/// [`PreviewResolver::set_link`] must be called from within one. Dropping the
/// resolver cancels any attempt still in flight.
pub struct PreviewResolver {
    fetcher: Arc<dyn DocumentFetcher>,
    enrichment_enabled: bool,
    link: Option<String>,
    slot: Arc<watch::Sender<Option<Enrichment>>>,
    attempt: Option<Attempt>,
}

impl PreviewResolver {
    /// Create a resolver with no active link.
    #[must_use]
    pub fn new(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            fetcher,
            enrichment_enabled: true,
            link: None,
            slot: Arc::new(slot),
            attempt: None,
        }
    }

    /// Create a resolver that fetches through the configured proxy.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let fetcher = ProxyFetcher::from_config(config)?;
        Ok(Self::new(Arc::new(fetcher)).with_enrichment(config.preview_enabled))
    }

    /// Enable or disable the asynchronous enrichment phase.
    #[must_use]
    pub fn with_enrichment(mut self, enabled: bool) -> Self {
        self.enrichment_enabled = enabled;
        self
    }

    /// The currently active link, if any.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Make `link` the active link.
    ///
    /// Setting the link that is already active is a no-op. Any other change
    /// cancels the current attempt, clears the enrichment slot and, when the
    /// new link parses, starts a fresh attempt for it.
    pub fn set_link(&mut self, link: Option<&str>) {
        if self.link.as_deref() == link {
            return;
        }

        self.cancel_attempt();
        self.slot.send_if_modified(|slot| slot.take().is_some());
        self.link = link.map(ToString::to_string);

        let Some(link) = link else {
            return;
        };
        if fallback_preview(link).is_none() {
            debug!(link = %link, "Link does not parse, no preview");
            return;
        }
        if self.enrichment_enabled {
            self.start_attempt(link);
        }
    }

    /// Drop the active link, as when the consuming view goes away.
    pub fn teardown(&mut self) {
        self.set_link(None);
    }

    /// The preview to display for the active link.
    #[must_use]
    pub fn preview(&self) -> Option<LinkPreview> {
        resolve(self.link.as_deref(), self.slot.borrow().as_ref())
    }

    /// Plain label for the active link, used when there is no preview card.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        self.link.as_deref().map(site_label)
    }

    /// Watch the enrichment slot.
    ///
    /// The slot may briefly hold an enrichment for a link that is no longer
    /// active; use [`PreviewResolver::preview`] for what should be displayed.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Enrichment>> {
        self.slot.subscribe()
    }

    /// Whether an enrichment attempt is still running.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.attempt
            .as_ref()
            .and_then(|a| a.handle.as_ref())
            .is_some_and(|h| !h.is_finished())
    }

    /// Wait for the current attempt, if any, to finish.
    pub async fn settle(&mut self) {
        let Some(attempt) = self.attempt.as_mut() else {
            return;
        };
        if let Some(handle) = attempt.handle.take() {
            if let Err(e) = handle.await {
                debug!(link = %attempt.link, "Enrichment task ended abnormally: {e}");
            }
        }
    }

    fn start_attempt(&mut self, link: &str) {
        let token = CancellationToken::new();
        let handle = tokio::spawn(enrich(
            Arc::clone(&self.fetcher),
            link.to_string(),
            Arc::clone(&self.slot),
            token.clone(),
        ));

        self.attempt = Some(Attempt {
            link: link.to_string(),
            _guard: token.drop_guard(),
            handle: Some(handle),
        });
    }

    fn cancel_attempt(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            debug!(link = %attempt.link, "Cancelling enrichment attempt");
        }
    }
}

impl std::fmt::Debug for PreviewResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewResolver")
            .field("link", &self.link)
            .field("enrichment_enabled", &self.enrichment_enabled)
            .field("pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}

/// Fetch, extract and commit one enrichment.
///
/// Failures are logged and dropped; the fallback stays in place.
async fn enrich(
    fetcher: Arc<dyn DocumentFetcher>,
    link: String,
    slot: Arc<watch::Sender<Option<Enrichment>>>,
    token: CancellationToken,
) {
    // Signal the token however this task ends
    let _guard = token.clone().drop_guard();

    let html = tokio::select! {
        biased;
        () = token.cancelled() => {
            debug!(link = %link, "Enrichment superseded before the fetch completed");
            return;
        }
        result = fetcher.fetch_document(&link) => match result {
            Ok(html) => html,
            Err(e) => {
                debug!(link = %link, "Preview fetch failed, keeping fallback: {e}");
                return;
            }
        },
    };

    let enrichment = extract_enrichment(&html, &link);
    let title = enrichment.title.clone().unwrap_or_default();

    // Checked under the slot's lock so a cancelled attempt never lands after
    // `set_link` has cleared the slot
    let committed = slot.send_if_modified(|current| {
        if token.is_cancelled() {
            return false;
        }
        *current = Some(enrichment);
        true
    });

    if committed {
        info!(link = %link, title = %title, "Link preview enriched");
    } else {
        debug!(link = %link, "Enrichment superseded before commit");
    }
}
