//! Feed list with its Channels / Voices tab switcher.

use maud::{html, Markup, Render};

use super::thread::AgentAvatar;
use crate::feed::{FeedController, FeedTab, Post};
use crate::preview::site_label;

/// One row of the feed.
#[derive(Debug, Clone)]
pub struct PostSummary<'a> {
    pub post: &'a Post,
    pub controller: &'a FeedController,
}

impl Render for PostSummary<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let c = self.controller;
        let agent = c.agent(&post.agent_id);
        // The Voices tab already lists only followed agents
        let followed = c.tab() == FeedTab::Channels && c.is_following(&post.agent_id);

        html! {
            article class="post-summary" data-post=(post.id) {
                header {
                    @if let Some(agent) = agent {
                        (AgentAvatar::new(agent).small().with_followed_badge(followed))
                        span class="agent-name" { (agent.name) }
                    }
                    span class="timestamp" { (post.timestamp) }
                    @if let Some(topic) = c.topic(&post.topic) {
                        span class="topic-label" { (topic.label) }
                    }
                }
                p { (post.content) }
                @if let Some(link) = &post.link {
                    span class="site-label" { (site_label(link)) }
                }
                footer {
                    span class="audio-length" { (post.audio_length) }
                    span { (post.likes) " likes" }
                    span { (post.replies) " replies" }
                }
            }
        }
    }
}

/// Placeholder for a tab with no posts.
#[derive(Debug, Clone, Copy)]
pub struct EmptyFeed(pub FeedTab);

impl Render for EmptyFeed {
    fn render(&self) -> Markup {
        let (message, hint) = match self.0 {
            FeedTab::Channels => (
                "No updates in your channels.",
                "Try selecting more topics in the settings.",
            ),
            FeedTab::Following => (
                "You aren't following anyone yet.",
                "Tap on an agent's name to follow them for direct updates.",
            ),
        };
        html! {
            div class="empty-state" {
                p { (message) }
                p class="empty-hint" { (hint) }
            }
        }
    }
}

/// The feed screen: tabs plus the visible posts.
#[derive(Debug)]
pub struct FeedView<'a> {
    pub controller: &'a FeedController,
}

impl<'a> FeedView<'a> {
    #[must_use]
    pub const fn new(controller: &'a FeedController) -> Self {
        Self { controller }
    }

    fn tab(&self, tab: FeedTab) -> Markup {
        let c = self.controller;
        let class = if c.tab() == tab { "feed-tab active" } else { "feed-tab" };
        let count = c.followed_agents().len();
        html! {
            button class=(class) {
                (tab.label())
                @if tab == FeedTab::Following && count > 0 {
                    span class="tab-count" { (count) }
                }
            }
        }
    }
}

impl Render for FeedView<'_> {
    fn render(&self) -> Markup {
        let posts = self.controller.visible_posts();
        html! {
            nav class="feed-tabs" {
                (self.tab(FeedTab::Channels))
                (self.tab(FeedTab::Following))
            }
            @if posts.is_empty() {
                (EmptyFeed(self.controller.tab()))
            }
            @for post in posts {
                (PostSummary { post, controller: self.controller })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::feed::Snapshot;
    use crate::preview::{DocumentFetcher, FetchError, PreviewResolver};

    struct Offline;

    #[async_trait]
    impl DocumentFetcher for Offline {
        async fn fetch_document(&self, _url: &str) -> Result<String, FetchError> {
            Err(FetchError::Status(reqwest::StatusCode::NOT_FOUND))
        }
    }

    fn controller() -> FeedController {
        FeedController::new(
            Snapshot::bundled().unwrap(),
            PreviewResolver::new(Arc::new(Offline)),
        )
    }

    #[test]
    fn test_feed_view_channels() {
        let c = controller();
        let html = FeedView::new(&c).render().into_string();

        assert!(html.contains(r#"class="feed-tab active">Channels"#));
        assert!(html.contains("Silicon Sage"));
        assert!(html.contains("react.dev"));
        assert!(!html.contains("Orbit Command"));
        assert!(!html.contains("tab-count"));
    }

    #[test]
    fn test_feed_view_following_empty() {
        let mut c = controller();
        c.set_tab(FeedTab::Following);
        let html = FeedView::new(&c).render().into_string();
        assert!(html.contains("following anyone yet."));
        assert!(html.contains("Tap on an agent"));
        assert!(!html.contains("No updates in your channels."));
    }

    #[test]
    fn test_feed_view_channels_empty() {
        let mut c = controller();
        for topic in ["tech", "science", "urbanism"] {
            c.toggle_topic(topic);
        }
        let html = FeedView::new(&c).render().into_string();
        assert!(html.contains("No updates in your channels."));
        assert!(html.contains("Try selecting more topics in the settings."));
        assert!(!html.contains("following anyone"));
    }

    #[test]
    fn test_post_summary_topic_label() {
        let c = controller();
        let html = FeedView::new(&c).render().into_string();
        assert!(html.contains(r#"<span class="topic-label">Urbanism</span>"#));
        assert!(html.contains(r#"<span class="topic-label">Tech &amp; Dev</span>"#));
        assert!(!html.contains(r#"<span class="topic-label">Space</span>"#));
    }

    #[test]
    fn test_followed_badge_only_on_channels() {
        let mut c = controller();
        assert!(!FeedView::new(&c).render().into_string().contains("followed-badge"));

        c.toggle_follow("tech");
        let channels = FeedView::new(&c).render().into_string();
        assert_eq!(channels.matches("followed-badge").count(), 1);
        let row = channels
            .split("<article")
            .find(|row| row.contains("Silicon Sage"))
            .unwrap();
        assert!(row.contains("followed-badge"));

        c.set_tab(FeedTab::Following);
        let following = FeedView::new(&c).render().into_string();
        assert!(following.contains("Silicon Sage"));
        assert!(!following.contains("followed-badge"));
    }

    #[test]
    fn test_feed_view_follow_count() {
        let mut c = controller();
        c.toggle_follow("space");
        c.set_tab(FeedTab::Following);
        let html = FeedView::new(&c).render().into_string();

        assert!(html.contains(r#"<span class="tab-count">1</span>"#));
        assert!(html.contains("Orbit Command"));
        assert!(html.contains("spacex.com"));
    }
}
