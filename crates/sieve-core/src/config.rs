//! Configuration management for comment-sieve

use crate::api::DEFAULT_BASE_URL;
use crate::comment::{Script, ScriptFilter};
use crate::error::{Result, SieveError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Project-local config location, relative to the working directory
pub const LOCAL_CONFIG_PATH: &str = ".comment-sieve/config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API settings
    pub api: ApiConfig,
    /// Filter settings
    pub filter: FilterConfig,
    /// Output settings
    pub output: OutputConfig,
}

/// API-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root
    pub base_url: String,
    /// Environment variable holding the key
    pub key_env: String,
    /// Per-request timeout; unset means wait indefinitely
    pub timeout_secs: Option<u64>,
    /// `maxResults` for commentThreads (1..=100); unset keeps the API default
    pub max_results: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            key_env: "YOUTUBE_API_KEY".to_string(),
            timeout_secs: None,
            max_results: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Filter-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Named script to look for
    pub script: Script,
    /// Custom regex overriding `script`
    pub pattern: Option<String>,
    /// File tag used with a custom pattern
    pub tag: Option<String>,
}

impl FilterConfig {
    /// Build the filter this section describes
    pub fn build(&self) -> Result<ScriptFilter> {
        match &self.pattern {
            Some(pattern) => {
                let tag = self.tag.clone().unwrap_or_else(|| "filtered".to_string());
                ScriptFilter::custom(pattern, tag)
            }
            None => Ok(ScriptFilter::new(self.script)),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the two files are written to
    pub dir: PathBuf,
    /// Export format name
    pub format: String,
    /// File stem for all non-owner comments
    pub all_stem: String,
    /// File stem prefix for filtered comments; the filter tag is appended
    pub filtered_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            format: "csv".to_string(),
            all_stem: "comments_all".to_string(),
            filtered_prefix: "comments_".to_string(),
        }
    }
}

impl OutputConfig {
    /// File stem for the filtered set, e.g. `comments_korean`
    pub fn filtered_stem(&self, tag: &str) -> String {
        format!("{}{}", self.filtered_prefix, tag)
    }
}

impl Config {
    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file without validating it.
    ///
    /// Callers merge command-line overrides first and then call
    /// [`Config::validate`] on the result.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SieveError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| SieveError::from(e).with_context(format!("In {}", path.display())))
    }

    /// Load from the first config file found, or defaults. Not validated.
    ///
    /// Lookup order: `explicit` → [`LOCAL_CONFIG_PATH`] → the platform
    /// config directory. An explicit path that does not exist is an error.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        for candidate in Self::search_paths() {
            if candidate.exists() {
                debug!("Using config file {:?}", candidate);
                return Self::load(&candidate);
            }
        }
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Candidate config paths, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_PATH)];
        if let Some(user) = user_config_path() {
            paths.push(user);
        }
        paths
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.api.max_results {
            if !(1..=100).contains(&n) {
                return Err(SieveError::Validation(format!(
                    "api.max_results must be between 1 and 100, got {}",
                    n
                )));
            }
        }
        if self.api.timeout_secs == Some(0) {
            return Err(SieveError::Validation(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.api.key_env.trim().is_empty() {
            return Err(SieveError::Validation("api.key_env must not be empty".to_string()));
        }
        check_file_part("output.all_stem", &self.output.all_stem, false)?;
        check_file_part("output.filtered_prefix", &self.output.filtered_prefix, true)?;

        let filter = self.filter.build()?;
        check_file_part("filter.tag", filter.tag(), false)?;

        // Both files land in the same directory, possibly on a
        // case-insensitive filesystem.
        let filtered_stem = self.output.filtered_stem(filter.tag());
        if filtered_stem.eq_ignore_ascii_case(&self.output.all_stem) {
            return Err(SieveError::Validation(format!(
                "filtered output '{}' would overwrite output.all_stem '{}'",
                filtered_stem, self.output.all_stem
            )));
        }
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SieveError::Toml(e.to_string()))
    }
}

/// Reject file-name parts that are blank or could leave `output.dir`
fn check_file_part(field: &str, value: &str, allow_empty: bool) -> Result<()> {
    if !allow_empty && value.trim().is_empty() {
        return Err(SieveError::Validation(format!("{} must not be empty", field)));
    }
    if value.contains(['/', '\\']) || value.contains("..") {
        return Err(SieveError::Validation(format!(
            "{} must be a plain file name part, got '{}'",
            field, value
        )));
    }
    Ok(())
}

/// `config.toml` under the platform config directory
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "comment-sieve", "comment-sieve")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.key_env, "YOUTUBE_API_KEY");
        assert!(config.api.timeout().is_none());
        assert_eq!(config.filter.script, Script::Hangul);
        assert_eq!(config.output.format, "csv");
        assert_eq!(config.output.filtered_stem("korean"), "comments_korean");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[api]"));
        assert!(toml.contains("[output]"));

        let config2 = Config::from_toml(&toml).unwrap();
        assert_eq!(config.output.all_stem, config2.output.all_stem);
        assert_eq!(config.filter.script, config2.filter.script);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml(
            r#"
            [filter]
            script = "cyrillic"

            [api]
            timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.filter.script, Script::Cyrillic);
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.api.key_env, "YOUTUBE_API_KEY");
    }

    #[test]
    fn test_invalid_max_results() {
        let err = Config::from_toml("[api]\nmax_results = 500\n").unwrap_err();
        assert!(matches!(err, SieveError::Validation(_)));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Config::from_toml("[filter]\npattern = \"[oops\"\n").unwrap_err();
        assert!(matches!(err, SieveError::Config(_)));
    }

    #[test]
    fn test_custom_pattern_tag() {
        let config = Config::from_toml("[filter]\npattern = \"[0-9]\"\ntag = \"digits\"\n").unwrap();
        let filter = config.filter.build().unwrap();
        assert_eq!(filter.tag(), "digits");
    }

    #[test]
    fn test_tag_colliding_with_all_stem() {
        let err = Config::from_toml(
            "[filter]\npattern = \"[가-힣]\"\ntag = \"all\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, SieveError::Validation(_)));
        assert!(err.to_string().contains("comments_all"));
    }

    #[test]
    fn test_prefix_colliding_with_all_stem() {
        let mut config = Config::default();
        config.output.filtered_prefix = String::new();
        config.output.all_stem = "Korean".to_string();
        assert!(matches!(config.validate(), Err(SieveError::Validation(_))));
    }

    #[test]
    fn test_tag_with_path_separator() {
        for tag in ["../escape", "sub/dir", "sub\\dir", ".."] {
            let mut config = Config::default();
            config.filter.pattern = Some("[0-9]".to_string());
            config.filter.tag = Some(tag.to_string());
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("filter.tag"), "tag {:?}: {}", tag, err);
        }
    }

    #[test]
    fn test_stems_with_path_separator() {
        let mut config = Config::default();
        config.output.all_stem = "../comments_all".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.filtered_prefix = "out/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_tag_rejected() {
        let mut config = Config::default();
        config.filter.pattern = Some("[0-9]".to_string());
        config.filter.tag = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_defers_validation() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[api]\nmax_results = 500\n").unwrap();

        let mut config = Config::load(&path).unwrap();
        assert!(config.validate().is_err());

        config.api.max_results = Some(50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_toml() {
        let err = Config::from_toml("[api\n").unwrap_err();
        assert!(matches!(err, SieveError::Toml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = Config::load(&temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, SieveError::FileNotFound(_)));
    }

    #[test]
    fn test_discover_explicit() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();
        let config = Config::discover(Some(&path)).unwrap();
        assert_eq!(config.output.format, "json");
    }
}
