use serde::Serialize;

/// Display data for a link preview card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkPreview {
    /// Host of the link with any leading `www.` removed.
    pub hostname: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
}

impl LinkPreview {
    /// Overlay an enrichment onto this preview.
    ///
    /// Fields present on the enrichment replace the ones here. The enrichment
    /// is only applied when it was computed for `link`; a stale one leaves the
    /// preview untouched.
    #[must_use]
    pub fn merged(mut self, link: &str, enrichment: Option<&Enrichment>) -> Self {
        let Some(enrichment) = enrichment.filter(|e| e.link == link) else {
            return self;
        };
        if let Some(title) = &enrichment.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &enrichment.description {
            self.description = Some(description.clone());
        }
        if let Some(favicon_url) = &enrichment.favicon_url {
            self.favicon_url = Some(favicon_url.clone());
        }
        self
    }
}

/// Preview fields recovered from a fetched document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    /// The exact link string this enrichment was computed for.
    pub link: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub favicon_url: Option<String>,
}

impl Enrichment {
    /// Check if the document yielded anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.favicon_url.is_none()
    }
}
