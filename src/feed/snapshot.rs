//! Loading the feed snapshot.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::models::Snapshot;

/// Snapshot shipped with the crate.
const BUNDLED_SNAPSHOT: &str = include_str!("../../data/snapshot.json");

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("post {post_id} references unknown agent '{agent_id}'")]
    UnknownPostAgent { post_id: u64, agent_id: String },
    #[error("comment {comment_id} references unknown agent '{agent_id}'")]
    UnknownCommentAgent { comment_id: u64, agent_id: String },
    #[error("agent keyed as '{key}' has id '{id}'")]
    AgentKeyMismatch { key: String, id: String },
}

impl Snapshot {
    /// The snapshot bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled data is inconsistent.
    pub fn bundled() -> Result<Self, SnapshotError> {
        Self::from_json(BUNDLED_SNAPSHOT)
    }

    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub async fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), bytes = json.len(), "Read snapshot file");
        Self::from_json(&json)
    }

    /// Parse and validate a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or references unknown agents.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check that every agent reference resolves.
    ///
    /// # Errors
    ///
    /// Returns the first dangling reference found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if let Some((key, agent)) = self.agents.iter().find(|(key, agent)| **key != agent.id) {
            return Err(SnapshotError::AgentKeyMismatch {
                key: key.clone(),
                id: agent.id.clone(),
            });
        }
        if let Some(post) = self
            .posts
            .iter()
            .find(|p| !self.agents.contains_key(&p.agent_id))
        {
            return Err(SnapshotError::UnknownPostAgent {
                post_id: post.id,
                agent_id: post.agent_id.clone(),
            });
        }
        for comment in &self.comments {
            if let Some(agent_id) = &comment.agent_id {
                if !self.agents.contains_key(agent_id) {
                    return Err(SnapshotError::UnknownCommentAgent {
                        comment_id: comment.id,
                        agent_id: agent_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
