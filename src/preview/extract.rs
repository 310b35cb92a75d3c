//! Preview metadata extraction from fetched HTML.
//!
//! Every field walks its own priority chain and falls through to `None` when
//! nothing usable is found, so a broken or empty document simply yields an
//! empty [`Enrichment`].

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use super::types::Enrichment;

static TITLE_CHAIN: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        r#"meta[property="og:title"]"#,
        r#"meta[name="twitter:title"], meta[property="twitter:title"]"#,
    ])
});

static DESCRIPTION_CHAIN: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        r#"meta[property="og:description"]"#,
        r#"meta[name="description"]"#,
        r#"meta[name="twitter:description"], meta[property="twitter:description"]"#,
    ])
});

static DOCUMENT_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("Invalid selector"));

static ICON_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("link[rel][href]").expect("Invalid selector"));

/// `rel` values accepted as a site icon, in priority order.
const ICON_RELS: &[&str] = &["icon", "shortcut icon", "apple-touch-icon"];

fn selectors(sources: &[&str]) -> Vec<Selector> {
    sources
        .iter()
        .map(|s| Selector::parse(s).expect("Invalid selector"))
        .collect()
}

/// Extract preview fields from a fetched document.
///
/// `link` is the page the document was fetched for; relative icon references
/// are resolved against its origin. The returned enrichment is keyed by `link`.
#[must_use]
pub fn extract_enrichment(html: &str, link: &str) -> Enrichment {
    let document = Html::parse_document(html);
    let page = Url::parse(link).ok();

    Enrichment {
        link: link.to_string(),
        title: first_meta_content(&document, &TITLE_CHAIN).or_else(|| document_title(&document)),
        description: first_meta_content(&document, &DESCRIPTION_CHAIN),
        favicon_url: page.and_then(|page| icon_url(&document, &page)),
    }
}

/// First non-empty `content` attribute, trying each selector in order.
fn first_meta_content(document: &Html, chain: &[Selector]) -> Option<String> {
    chain.iter().find_map(|selector| {
        document
            .select(selector)
            .filter_map(|el| el.value().attr("content"))
            .find_map(non_empty)
    })
}

fn document_title(document: &Html) -> Option<String> {
    document.select(&DOCUMENT_TITLE).find_map(|el| {
        let text: String = el.text().collect();
        // Collapse the whitespace some sites put inside <title>
        non_empty(&text.split_whitespace().collect::<Vec<_>>().join(" "))
    })
}

fn icon_url(document: &Html, page: &Url) -> Option<String> {
    let candidates: Vec<(String, &str)> = document
        .select(&ICON_LINKS)
        .filter_map(|el| {
            let rel = el.value().attr("rel")?;
            let href = el.value().attr("href")?.trim();
            if href.is_empty() {
                return None;
            }
            let rel = rel.split_whitespace().collect::<Vec<_>>().join(" ");
            Some((rel.to_lowercase(), href))
        })
        .collect();

    let href = ICON_RELS.iter().find_map(|wanted| {
        candidates
            .iter()
            .find(|(rel, _)| rel == wanted)
            .map(|(_, href)| *href)
    })?;

    resolve_against_origin(page, href)
}

/// Resolve `href` against the origin of `page`.
///
/// Absolute hrefs pass through untouched.
fn resolve_against_origin(page: &Url, href: &str) -> Option<String> {
    if let Ok(absolute) = Url::parse(href) {
        return Some(absolute.to_string());
    }
    let origin = page.origin();
    if !origin.is_tuple() {
        return None;
    }
    let base = Url::parse(&origin.ascii_serialization()).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "https://example.com/articles/42";

    #[test]
    fn test_og_title_wins_over_twitter() {
        let html = r#"
            <html>
                <head>
                    <meta name="twitter:title" content="Twitter Title">
                    <meta property="og:title" content="OG Title">
                    <title>Document Title</title>
                </head>
            </html>
        "#;

        let enrichment = extract_enrichment(html, LINK);
        assert_eq!(enrichment.title.as_deref(), Some("OG Title"));
        assert_eq!(enrichment.link, LINK);
    }

    #[test]
    fn test_twitter_title_before_document_title() {
        let html = r#"
            <html>
                <head>
                    <title>Document Title</title>
                    <meta name="twitter:title" content="Twitter Title">
                </head>
            </html>
        "#;

        let enrichment = extract_enrichment(html, LINK);
        assert_eq!(enrichment.title.as_deref(), Some("Twitter Title"));
    }

    #[test]
    fn test_document_title_fallback() {
        let html = r#"
            <html>
                <head>
                    <meta property="og:title" content="   ">
                    <title>
                        Document
                        Title
                    </title>
                </head>
            </html>
        "#;

        let enrichment = extract_enrichment(html, LINK);
        assert_eq!(enrichment.title.as_deref(), Some("Document Title"));
    }

    #[test]
    fn test_no_title_at_all() {
        let enrichment = extract_enrichment("<html><body><p>hi</p></body></html>", LINK);
        assert_eq!(enrichment.title, None);
    }

    #[test]
    fn test_description_chain() {
        let all = r#"
            <head>
                <meta name="twitter:description" content="Twitter">
                <meta name="description" content="Plain">
                <meta property="og:description" content="OG">
            </head>
        "#;
        assert_eq!(extract_enrichment(all, LINK).description.as_deref(), Some("OG"));

        let no_og = r#"
            <head>
                <meta name="twitter:description" content="Twitter">
                <meta name="description" content="Plain">
            </head>
        "#;
        assert_eq!(
            extract_enrichment(no_og, LINK).description.as_deref(),
            Some("Plain")
        );

        let twitter_only = r#"<head><meta name="twitter:description" content="Twitter"></head>"#;
        assert_eq!(
            extract_enrichment(twitter_only, LINK).description.as_deref(),
            Some("Twitter")
        );

        assert_eq!(extract_enrichment("<head></head>", LINK).description, None);
    }

    #[test]
    fn test_relative_icon_resolves_against_page_origin() {
        let html = r#"<head><link rel="icon" href="/icons/fav.png"></head>"#;
        let enrichment = extract_enrichment(html, LINK);
        assert_eq!(
            enrichment.favicon_url.as_deref(),
            Some("https://example.com/icons/fav.png")
        );
    }

    #[test]
    fn test_path_relative_icon_uses_origin_not_page_path() {
        let html = r#"<head><link rel="icon" href="static/fav.png"></head>"#;
        let enrichment = extract_enrichment(html, LINK);
        assert_eq!(
            enrichment.favicon_url.as_deref(),
            Some("https://example.com/static/fav.png")
        );
    }

    #[test]
    fn test_absolute_and_protocol_relative_icons() {
        let absolute = r#"<head><link rel="icon" href="https://cdn.example.net/f.ico"></head>"#;
        assert_eq!(
            extract_enrichment(absolute, LINK).favicon_url.as_deref(),
            Some("https://cdn.example.net/f.ico")
        );

        let protocol_relative = r#"<head><link rel="icon" href="//cdn.example.net/f.ico"></head>"#;
        assert_eq!(
            extract_enrichment(protocol_relative, LINK)
                .favicon_url
                .as_deref(),
            Some("https://cdn.example.net/f.ico")
        );
    }

    #[test]
    fn test_icon_rel_priority() {
        let html = r#"
            <head>
                <link rel="apple-touch-icon" href="/apple.png">
                <link rel="Shortcut  Icon" href="/shortcut.ico">
                <link rel="stylesheet" href="/site.css">
            </head>
        "#;
        assert_eq!(
            extract_enrichment(html, LINK).favicon_url.as_deref(),
            Some("https://example.com/shortcut.ico")
        );

        let with_icon = r#"
            <head>
                <link rel="apple-touch-icon" href="/apple.png">
                <link rel="icon" href="/icon.png">
            </head>
        "#;
        assert_eq!(
            extract_enrichment(with_icon, LINK).favicon_url.as_deref(),
            Some("https://example.com/icon.png")
        );
    }

    #[test]
    fn test_no_icon_links() {
        let html = r#"<head><link rel="stylesheet" href="/site.css"></head>"#;
        assert_eq!(extract_enrichment(html, LINK).favicon_url, None);
    }

    #[test]
    fn test_garbage_document() {
        let enrichment = extract_enrichment("<<<>>> not html at all", LINK);
        assert!(enrichment.is_empty());
    }

    #[test]
    fn test_trims_meta_content() {
        let html = r#"<head><meta property="og:title" content="  Trimmed Title  "></head>"#;
        assert_eq!(
            extract_enrichment(html, LINK).title.as_deref(),
            Some("Trimmed Title")
        );
    }
}
