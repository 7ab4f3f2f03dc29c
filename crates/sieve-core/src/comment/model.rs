//! Comment data models

use crate::types::ChannelId;
use serde::{Deserialize, Serialize};

/// A top-level comment on a video, as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Author display name
    pub author: String,
    /// Comment text (plain-text rendering)
    pub text: String,
    /// Channel of the comment author; empty for deleted accounts
    pub author_channel_id: ChannelId,
}

impl Comment {
    pub fn new(
        author: impl Into<String>,
        text: impl Into<String>,
        author_channel_id: ChannelId,
    ) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            author_channel_id,
        }
    }

    /// Whether this comment was written by the given channel
    pub fn is_by(&self, channel: &ChannelId) -> bool {
        &self.author_channel_id == channel
    }

    /// The `(author, text)` pair written to output files
    pub fn record(&self) -> CommentRecord<'_> {
        CommentRecord {
            author: &self.author,
            comment: &self.text,
        }
    }
}

/// One output row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommentRecord<'a> {
    pub author: &'a str,
    pub comment: &'a str,
}
