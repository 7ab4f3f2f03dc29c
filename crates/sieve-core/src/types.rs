//! Core type definitions for comment-sieve

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform-assigned identifier of a single video
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(pub String);

impl VideoId {
    /// Create a VideoId from a string
    pub fn from_string(s: impl Into<String>) -> Self {
        VideoId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform-assigned identifier of a channel (uploader or commenter)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl ChannelId {
    /// Create a ChannelId from a string
    pub fn from_string(s: impl Into<String>) -> Self {
        ChannelId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Comments from deleted accounts carry no channel id
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// API credential.
///
/// The secret is only reachable through [`ApiKey::expose`]; `Debug` and
/// `Display` print a redacted form so the key never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create an ApiKey, rejecting blank values
    pub fn new(key: impl Into<String>) -> crate::Result<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(crate::SieveError::Config("API key is empty".to_string()));
        }
        Ok(ApiKey(key))
    }

    /// The raw key, for building request URLs
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.0.chars().take(4).collect();
        write!(f, "{}***", visible)
    }
}
