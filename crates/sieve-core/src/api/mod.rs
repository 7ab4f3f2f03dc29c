//! YouTube Data API access
//!
//! Two requests make up a run: `videos` to resolve the uploader's channel,
//! then `commentThreads` for the first page of top-level comments. Both go
//! through a [`Transport`] so tests can substitute canned responses.

mod client;
pub(crate) mod transport;
mod wire;

pub use client::{YouTubeClient, DEFAULT_BASE_URL};
pub use transport::{HttpResponse, HttpTransport, Transport};
