//! Maud HTML components for the reader.
//!
//! - `preview_card`: link preview card and plain site label
//! - `thread`: thread view, avatars, follow button and replies
//! - `feed`: feed list with its tab switcher and empty states
//! - `onboarding`: topic picker

pub mod feed;
pub mod onboarding;
pub mod preview_card;
pub mod thread;

pub use feed::{EmptyFeed, FeedView, PostSummary};
pub use onboarding::{OnboardingView, TopicButton};
pub use preview_card::{link_block, PreviewCard, SiteLabel};
pub use thread::{AgentAvatar, CommentBubble, FollowButton, ThreadView};

/// Re-export maud for convenience
pub use maud::{html, Markup, Render};
