//! Fetch-filter-write pipeline
//!
//! `ExtractId → ResolveOwner → FetchComments → Classify → Write`, strictly
//! in order. The first failing stage aborts the run; nothing is written
//! until both API calls and classification have succeeded.

use crate::api::{HttpTransport, Transport, YouTubeClient};
use crate::comment::{partition, Comment, CommentRecord, ScriptFilter};
use crate::config::{Config, OutputConfig};
use crate::error::{Result, SieveError};
use crate::export::ExportManager;
use crate::extract::parse_video_url;
use crate::types::{ApiKey, ChannelId, VideoId};
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ExtractId,
    ResolveOwner,
    FetchComments,
    Classify,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::ExtractId => "Extracting video id",
            Stage::ResolveOwner => "Resolving video owner",
            Stage::FetchComments => "Fetching comments",
            Stage::Classify => "Classifying comments",
            Stage::Write => "Writing output files",
        };
        f.write_str(label)
    }
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub video_id: VideoId,
    pub owner: ChannelId,
    /// Comments returned by the API
    pub fetched: usize,
    /// Owner comments dropped
    pub excluded: usize,
    /// Rows in the "all" output
    pub all: usize,
    /// Rows in the "filtered" output
    pub filtered: usize,
    pub all_path: PathBuf,
    pub filtered_path: PathBuf,
}

/// One configured run of the pipeline
pub struct Pipeline<T: Transport> {
    client: YouTubeClient<T>,
    filter: ScriptFilter,
    exports: ExportManager,
    output: OutputConfig,
}

impl Pipeline<HttpTransport> {
    /// Build a pipeline that talks to the real API
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config.api.timeout())?;
        let client = YouTubeClient::new(transport)
            .with_base_url(config.api.base_url.clone())
            .with_max_results(config.api.max_results);
        Self::new(client, config.filter.build()?, config.output.clone())
    }
}

impl<T: Transport> Pipeline<T> {
    pub fn new(client: YouTubeClient<T>, filter: ScriptFilter, output: OutputConfig) -> Result<Self> {
        let exports = ExportManager::new();
        if !exports.has_format(&output.format) {
            return Err(SieveError::Validation(format!(
                "Unknown export format: {} (available: {})",
                output.format,
                exports.available_formats().join(", ")
            )));
        }
        Ok(Self {
            client,
            filter,
            exports,
            output,
        })
    }

    pub fn filter(&self) -> &ScriptFilter {
        &self.filter
    }

    /// Run every stage for `url`
    pub fn run(&self, key: &ApiKey, url: &str) -> Result<RunSummary> {
        self.run_with(key, url, |_| {})
    }

    /// Run every stage, calling `on_stage` as each one starts
    pub fn run_with(
        &self,
        key: &ApiKey,
        url: &str,
        mut on_stage: impl FnMut(Stage),
    ) -> Result<RunSummary> {
        on_stage(Stage::ExtractId);
        let video_id = parse_video_url(url)?;
        info!("Video id: {}", video_id);

        on_stage(Stage::ResolveOwner);
        let owner = self.client.resolve_owner(key, &video_id)?;

        on_stage(Stage::FetchComments);
        let comments = self.client.fetch_comments(key, &video_id)?;

        on_stage(Stage::Classify);
        let classified = partition(&comments, &owner, &self.filter);
        info!(
            "{} comments: {} from owner, {} kept, {} match {}",
            comments.len(),
            classified.excluded,
            classified.all.len(),
            classified.filtered.len(),
            self.filter.tag()
        );

        on_stage(Stage::Write);
        let filtered_path = self.write_set(
            &classified.filtered,
            &self.output.filtered_stem(self.filter.tag()),
        )?;
        let all_path = self.write_set(&classified.all, &self.output.all_stem)?;

        Ok(RunSummary {
            video_id,
            owner,
            fetched: comments.len(),
            excluded: classified.excluded,
            all: classified.all.len(),
            filtered: classified.filtered.len(),
            all_path,
            filtered_path,
        })
    }

    fn write_set(&self, comments: &[&Comment], stem: &str) -> Result<PathBuf> {
        let records: Vec<CommentRecord<'_>> = comments.iter().map(|c| c.record()).collect();
        self.exports
            .export_to_file(&records, &self.output.format, &self.output.dir, stem)
    }
}
