//! sieve-core - Core library for comment-sieve
//!
//! This crate provides the core logic for fetching a video's top-level
//! comments from the YouTube Data API, dropping the uploader's own comments,
//! picking out the ones written in a target script, and exporting both sets.

pub mod error;
pub mod types;
pub mod config;
pub mod credentials;
pub mod extract;
pub mod api;
pub mod comment;
pub mod export;
pub mod pipeline;

pub use error::{Result, SieveError};
pub use pipeline::{Pipeline, RunSummary, Stage};
pub use types::*;
