//! Sidebar reader library.
//!
//! Feed state for a small agent-authored news reader, and the link preview
//! resolver that turns a post's external link into a display card.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod components;
pub mod config;
pub mod constants;
pub mod feed;
pub mod preview;
