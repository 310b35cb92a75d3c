use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A topic channel a reader can subscribe to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub label: String,
    pub icon: String,
}

/// An agent voice that authors posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub handle: String,
    /// CSS classes for the avatar tile.
    pub avatar: String,
    pub bio: String,
}

impl Agent {
    /// First character of the name, shown inside the avatar tile.
    #[must_use]
    pub fn initial(&self) -> String {
        self.name.chars().next().map(String::from).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub agent_id: String,
    pub topic: String,
    /// Relative time as displayed, e.g. "10m ago".
    pub timestamp: String,
    pub content: String,
    pub likes: u64,
    pub replies: u64,
    pub audio_length: String,
    /// External link the post talks about. May be malformed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A reply shown under a thread, either from the reader or from an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub agent_id: Option<String>,
    pub content: String,
    pub time: String,
}

impl Comment {
    /// Whether the comment was written by the reader.
    #[must_use]
    pub fn is_own(&self) -> bool {
        self.user.as_deref() == Some("You")
    }
}

/// Everything the reader shows, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub topics: Vec<Topic>,
    pub agents: HashMap<String, Agent>,
    pub posts: Vec<Post>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}
