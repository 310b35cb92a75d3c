//! Reader state and the transitions that change it.
//!
//! All state lives on [`FeedController`]; views read from it and call its
//! named transitions. The thread view's link preview is owned here too, so
//! leaving the thread is what tears the preview down.

use tracing::{debug, info};

use super::models::{Agent, Comment, Post, Snapshot, Topic};
use crate::preview::{LinkPreview, PreviewResolver};

/// Topics selected for a new reader.
pub const DEFAULT_TOPICS: &[&str] = &["tech", "science", "urbanism"];

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Onboarding,
    Feed,
    /// Thread view for the post with this id.
    Detail(u64),
}

/// Feed tab selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedTab {
    /// Posts from the selected topics.
    #[default]
    Channels,
    /// Posts from followed agents.
    Following,
}

impl FeedTab {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Channels => "Channels",
            Self::Following => "Voices",
        }
    }
}

#[derive(Debug)]
pub struct FeedController {
    snapshot: Snapshot,
    selected_topics: Vec<String>,
    tab: FeedTab,
    followed_agents: Vec<String>,
    screen: Screen,
    preview: PreviewResolver,
}

impl FeedController {
    /// Start on the onboarding screen with the default topic selection.
    #[must_use]
    pub fn new(snapshot: Snapshot, preview: PreviewResolver) -> Self {
        Self {
            snapshot,
            selected_topics: DEFAULT_TOPICS.iter().map(ToString::to_string).collect(),
            tab: FeedTab::default(),
            followed_agents: Vec::new(),
            screen: Screen::Onboarding,
            preview,
        }
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.snapshot.topics
    }

    #[must_use]
    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.snapshot.topics.iter().find(|t| t.id == topic_id)
    }

    #[must_use]
    pub fn agent(&self, agent_id: &str) -> Option<&Agent> {
        self.snapshot.agents.get(agent_id)
    }

    #[must_use]
    pub fn post(&self, post_id: u64) -> Option<&Post> {
        self.snapshot.posts.iter().find(|p| p.id == post_id)
    }

    #[must_use]
    pub fn selected_topics(&self) -> &[String] {
        &self.selected_topics
    }

    #[must_use]
    pub fn is_topic_selected(&self, topic_id: &str) -> bool {
        self.selected_topics.iter().any(|t| t == topic_id)
    }

    #[must_use]
    pub fn followed_agents(&self) -> &[String] {
        &self.followed_agents
    }

    #[must_use]
    pub fn is_following(&self, agent_id: &str) -> bool {
        self.followed_agents.iter().any(|a| a == agent_id)
    }

    #[must_use]
    pub const fn tab(&self) -> FeedTab {
        self.tab
    }

    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// Select the topic if it is not selected, deselect it otherwise.
    pub fn toggle_topic(&mut self, topic_id: &str) {
        toggle(&mut self.selected_topics, topic_id);
        debug!(topic = %topic_id, selected = self.is_topic_selected(topic_id), "Toggled topic");
    }

    /// Follow the agent if not followed, unfollow otherwise.
    pub fn toggle_follow(&mut self, agent_id: &str) {
        toggle(&mut self.followed_agents, agent_id);
        debug!(agent = %agent_id, following = self.is_following(agent_id), "Toggled follow");
    }

    pub fn set_tab(&mut self, tab: FeedTab) {
        self.tab = tab;
    }

    /// Posts shown on the feed for the current tab, in snapshot order.
    #[must_use]
    pub fn visible_posts(&self) -> Vec<&Post> {
        self.snapshot
            .posts
            .iter()
            .filter(|post| match self.tab {
                FeedTab::Channels => self.is_topic_selected(&post.topic),
                FeedTab::Following => self.is_following(&post.agent_id),
            })
            .collect()
    }

    /// Open the thread for a post.
    ///
    /// An unknown id lands back on the feed and returns `false`.
    pub fn open_thread(&mut self, post_id: u64) -> bool {
        let Some(link) = self.post(post_id).map(|p| p.link.clone()) else {
            debug!(post_id, "Unknown post, returning to feed");
            self.go_to(Screen::Feed);
            return false;
        };

        info!(post_id, link = link.as_deref().unwrap_or(""), "Opening thread");
        self.screen = Screen::Detail(post_id);
        self.preview.set_link(link.as_deref());
        true
    }

    /// Navigate to a screen.
    ///
    /// Leaving a thread tears down its link preview.
    pub fn go_to(&mut self, screen: Screen) {
        if let Screen::Detail(post_id) = screen {
            self.open_thread(post_id);
            return;
        }
        if matches!(self.screen, Screen::Detail(_)) {
            self.preview.teardown();
        }
        self.screen = screen;
    }

    /// Post of the open thread.
    #[must_use]
    pub fn active_post(&self) -> Option<&Post> {
        match self.screen {
            Screen::Detail(post_id) => self.post(post_id),
            _ => None,
        }
    }

    /// Author of the open thread.
    #[must_use]
    pub fn active_agent(&self) -> Option<&Agent> {
        self.active_post().and_then(|p| self.agent(&p.agent_id))
    }

    /// Replies shown under the open thread.
    #[must_use]
    pub fn thread_comments(&self) -> &[Comment] {
        if self.active_post().is_some() {
            &self.snapshot.comments
        } else {
            &[]
        }
    }

    /// Link preview for the open thread.
    #[must_use]
    pub fn preview(&self) -> Option<LinkPreview> {
        self.preview.preview()
    }

    /// Plain site label for the open thread's link.
    #[must_use]
    pub fn preview_label(&self) -> Option<String> {
        self.preview.label()
    }

    /// Wait for the open thread's preview enrichment to finish.
    pub async fn settle_preview(&mut self) {
        self.preview.settle().await;
    }
}

fn toggle(list: &mut Vec<String>, id: &str) {
    if let Some(pos) = list.iter().position(|x| x == id) {
        list.remove(pos);
    } else {
        list.push(id.to_string());
    }
}
