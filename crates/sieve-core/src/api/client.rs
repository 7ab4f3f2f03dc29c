//! YouTube Data API client

use super::transport::{HttpResponse, Transport};
use super::wire::{ApiErrorResponse, CommentThreadListResponse, VideoListResponse};
use crate::comment::Comment;
use crate::error::{Result, SieveError};
use crate::types::{ApiKey, ChannelId, VideoId};
use reqwest::Url;
use tracing::{debug, info, warn};

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Error reason the API reports for videos with comments turned off
const COMMENTS_DISABLED: &str = "commentsDisabled";

/// Client for the two endpoints the pipeline uses
pub struct YouTubeClient<T: Transport> {
    transport: T,
    base_url: String,
    max_results: Option<u32>,
}

impl<T: Transport> YouTubeClient<T> {
    /// Create a client against the default API root
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results: None,
        }
    }

    /// Override the API root (no trailing slash needed)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Page size for `commentThreads`; `None` keeps the API default
    pub fn with_max_results(mut self, max_results: Option<u32>) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Look up the channel that uploaded `video`
    pub fn resolve_owner(&self, key: &ApiKey, video: &VideoId) -> Result<ChannelId> {
        let url = self.endpoint(
            "videos",
            &[
                ("part", "snippet"),
                ("id", video.as_str()),
                ("key", key.expose()),
            ],
        )?;

        debug!("Resolving owner of video {}", video);
        let response = self.transport.get(url.as_str())?;
        if !response.is_success() {
            return Err(api_error(&response));
        }

        let list: VideoListResponse = serde_json::from_str(&response.body)?;
        let owner = list
            .items
            .into_iter()
            .next()
            .map(|item| ChannelId::from_string(item.snippet.channel_id))
            .filter(|owner| !owner.is_empty())
            .ok_or_else(|| SieveError::NotFound(format!("No video information found for {}", video)))?;

        info!("Video {} belongs to channel {}", video, owner);
        Ok(owner)
    }

    /// Fetch the first page of top-level comments on `video`
    pub fn fetch_comments(&self, key: &ApiKey, video: &VideoId) -> Result<Vec<Comment>> {
        let max_results = self.max_results.map(|n| n.to_string());
        let mut params = vec![
            ("key", key.expose()),
            ("textFormat", "plainText"),
            ("part", "snippet"),
            ("videoId", video.as_str()),
        ];
        if let Some(n) = max_results.as_deref() {
            params.push(("maxResults", n));
        }
        let url = self.endpoint("commentThreads", &params)?;

        debug!("Fetching comment threads for video {}", video);
        let response = self.transport.get(url.as_str())?;
        if !response.is_success() {
            let err = api_error(&response);
            if let SieveError::Api { reason, .. } = &err {
                if reason == COMMENTS_DISABLED {
                    warn!("Comments are disabled for video {}", video);
                    return Ok(Vec::new());
                }
            }
            return Err(err);
        }

        let list: CommentThreadListResponse = serde_json::from_str(&response.body)?;
        if list.next_page_token.is_some() {
            debug!("More comment pages exist; only the first page is used");
        }

        let comments: Vec<Comment> = list
            .items
            .into_iter()
            .map(|thread| {
                let snippet = thread.snippet.top_level_comment.snippet;
                Comment::new(
                    snippet.author_display_name,
                    snippet.text_display,
                    snippet
                        .author_channel_id
                        .map(|id| ChannelId::from_string(id.value))
                        .unwrap_or_default(),
                )
            })
            .collect();

        info!("Fetched {} comments for video {}", comments.len(), video);
        Ok(comments)
    }

    fn endpoint(&self, resource: &str, params: &[(&str, &str)]) -> Result<Url> {
        let base = format!("{}/{}", self.base_url, resource);
        Url::parse_with_params(&base, params)
            .map_err(|e| SieveError::Config(format!("Invalid API base URL '{}': {}", self.base_url, e)))
    }
}

/// Build an [`SieveError::Api`] from a non-2xx response
fn api_error(response: &HttpResponse) -> SieveError {
    match serde_json::from_str::<ApiErrorResponse>(&response.body) {
        Ok(envelope) => SieveError::Api {
            status: response.status,
            reason: envelope.error.reason().unwrap_or("unknown").to_string(),
            message: envelope.error.message,
        },
        Err(_) => SieveError::Api {
            status: response.status,
            reason: "unknown".to_string(),
            message: response.body.chars().take(200).collect(),
        },
    }
}
