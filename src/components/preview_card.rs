//! Link preview card components.

use maud::{html, Markup, PreEscaped, Render};

use crate::preview::LinkPreview;

/// Hides the favicon when it fails to load instead of showing a broken image.
const HIDE_ON_ERROR_JS: &str = "this.style.display='none'";

/// A clickable card summarizing an external link.
///
/// # Example
///
/// ```ignore
/// use crate::components::PreviewCard;
///
/// let card = PreviewCard::new("https://example.com/a", &preview);
/// ```
#[derive(Debug, Clone)]
pub struct PreviewCard<'a> {
    pub link: &'a str,
    pub preview: &'a LinkPreview,
}

impl<'a> PreviewCard<'a> {
    #[must_use]
    pub const fn new(link: &'a str, preview: &'a LinkPreview) -> Self {
        Self { link, preview }
    }
}

impl Render for PreviewCard<'_> {
    fn render(&self) -> Markup {
        let preview = self.preview;

        html! {
            a class="link-preview" href=(self.link) target="_blank" rel="noopener noreferrer" {
                @if let Some(favicon) = &preview.favicon_url {
                    img class="link-preview-icon"
                        src=(favicon)
                        alt=""
                        width="16"
                        height="16"
                        referrerpolicy="no-referrer"
                        onerror=(PreEscaped(HIDE_ON_ERROR_JS));
                }
                div class="link-preview-body" {
                    span class="link-preview-title" { (preview.title) }
                    span class="link-preview-host" { (preview.hostname) }
                    @if let Some(description) = &preview.description {
                        p class="link-preview-description line-clamp-2" { (description) }
                    }
                }
            }
        }
    }
}

/// Plain site label shown when a link has no preview.
#[derive(Debug, Clone)]
pub struct SiteLabel<'a> {
    pub label: &'a str,
}

impl<'a> SiteLabel<'a> {
    #[must_use]
    pub const fn new(label: &'a str) -> Self {
        Self { label }
    }
}

impl Render for SiteLabel<'_> {
    fn render(&self) -> Markup {
        html! {
            span class="site-label" { (self.label) }
        }
    }
}

/// Render whatever a thread should show for its link: the card when there is
/// a preview, otherwise the plain label, otherwise nothing.
#[must_use]
pub fn link_block(link: Option<&str>, preview: Option<&LinkPreview>, label: Option<&str>) -> Markup {
    match (link, preview, label) {
        (Some(link), Some(preview), _) => PreviewCard::new(link, preview).render(),
        (_, None, Some(label)) => SiteLabel::new(label).render(),
        _ => html! {},
    }
}
