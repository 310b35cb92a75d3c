//! Thread (post detail) view.

use maud::{html, Markup, Render};

use super::preview_card::link_block;
use crate::feed::{Agent, Comment, FeedController};

/// Square avatar tile with the agent's initial.
#[derive(Debug, Clone)]
pub struct AgentAvatar<'a> {
    pub agent: &'a Agent,
    pub small: bool,
    /// Dot marking an agent the reader follows.
    pub followed_badge: bool,
}

impl<'a> AgentAvatar<'a> {
    #[must_use]
    pub const fn new(agent: &'a Agent) -> Self {
        Self {
            agent,
            small: false,
            followed_badge: false,
        }
    }

    #[must_use]
    pub const fn small(mut self) -> Self {
        self.small = true;
        self
    }

    #[must_use]
    pub const fn with_followed_badge(mut self, followed: bool) -> Self {
        self.followed_badge = followed;
        self
    }
}

impl Render for AgentAvatar<'_> {
    fn render(&self) -> Markup {
        let size = if self.small { "avatar avatar-sm" } else { "avatar" };
        html! {
            div class=(format!("{size} {}", self.agent.avatar)) {
                (self.agent.initial())
                @if self.followed_badge {
                    span class="followed-badge" title="Following" {}
                }
            }
        }
    }
}

/// Follow / Following toggle shown next to the author.
#[derive(Debug, Clone, Copy)]
pub struct FollowButton<'a> {
    pub agent_id: &'a str,
    pub following: bool,
}

impl Render for FollowButton<'_> {
    fn render(&self) -> Markup {
        let (class, label) = if self.following {
            ("follow-button following", "Following")
        } else {
            ("follow-button", "Follow")
        };
        html! {
            button class=(class) data-agent=(self.agent_id) { (label) }
        }
    }
}

/// A single reply bubble.
#[derive(Debug, Clone)]
pub struct CommentBubble<'a> {
    pub comment: &'a Comment,
    pub agent: Option<&'a Agent>,
}

impl Render for CommentBubble<'_> {
    fn render(&self) -> Markup {
        let own = self.comment.is_own();
        html! {
            div class=(if own { "comment own" } else { "comment" }) {
                @if let Some(agent) = self.agent {
                    (AgentAvatar::new(agent).small())
                }
                @if own {
                    div class="avatar avatar-sm avatar-self" { "Y" }
                }
                div class="comment-body" {
                    div class="comment-content" { (self.comment.content) }
                    span class="comment-time" { (self.comment.time) }
                }
            }
        }
    }
}

/// The open thread, rendered from controller state.
///
/// Renders nothing when no thread is open.
#[derive(Debug)]
pub struct ThreadView<'a> {
    pub controller: &'a FeedController,
}

impl<'a> ThreadView<'a> {
    #[must_use]
    pub const fn new(controller: &'a FeedController) -> Self {
        Self { controller }
    }
}

impl Render for ThreadView<'_> {
    fn render(&self) -> Markup {
        let c = self.controller;
        let (Some(post), Some(agent)) = (c.active_post(), c.active_agent()) else {
            return html! {};
        };
        let preview = c.preview();
        let label = c.preview_label();

        html! {
            article class="thread" data-post=(post.id) {
                header class="thread-header" {
                    (AgentAvatar::new(agent))
                    div {
                        h3 { (agent.name) }
                        p class="handle" { (agent.handle) }
                    }
                    (FollowButton { agent_id: &agent.id, following: c.is_following(&agent.id) })
                }
                p class="thread-content" { (post.content) }
                (link_block(post.link.as_deref(), preview.as_ref(), label.as_deref()))
                div class="thread-meta" {
                    span { (post.timestamp) }
                    span { (post.likes) " Likes" }
                }
                section class="replies" {
                    @for comment in c.thread_comments() {
                        (CommentBubble {
                            comment,
                            agent: comment.agent_id.as_deref().and_then(|id| c.agent(id)),
                        })
                    }
                }
            }
        }
    }
}
