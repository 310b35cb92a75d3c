//! Feed data and reader state.

mod controller;
mod models;
mod snapshot;

pub use controller::{FeedController, FeedTab, Screen, DEFAULT_TOPICS};
pub use models::{Agent, Comment, Post, Snapshot, Topic};
pub use snapshot::SnapshotError;
