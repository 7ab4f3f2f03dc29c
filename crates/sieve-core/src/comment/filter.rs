//! Owner exclusion and script-based filtering

use super::model::Comment;
use crate::error::{Result, SieveError};
use crate::types::ChannelId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Writing systems the filter knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Precomposed Hangul syllables (U+AC00..=U+D7A3)
    #[default]
    Hangul,
    Hiragana,
    Katakana,
    Han,
    Cyrillic,
    Arabic,
    Thai,
}

impl Script {
    /// All known scripts
    pub const ALL: [Script; 7] = [
        Script::Hangul,
        Script::Hiragana,
        Script::Katakana,
        Script::Han,
        Script::Cyrillic,
        Script::Arabic,
        Script::Thai,
    ];

    /// Regex character class matching one character of this script
    pub fn pattern(&self) -> &'static str {
        match self {
            Script::Hangul => "[가-힣]",
            Script::Hiragana => r"\p{Hiragana}",
            Script::Katakana => r"\p{Katakana}",
            Script::Han => r"\p{Han}",
            Script::Cyrillic => r"\p{Cyrillic}",
            Script::Arabic => r"\p{Arabic}",
            Script::Thai => r"\p{Thai}",
        }
    }

    /// Tag used in the filtered output file name (`comments_{tag}`)
    pub fn file_tag(&self) -> &'static str {
        match self {
            Script::Hangul => "korean",
            Script::Hiragana => "hiragana",
            Script::Katakana => "katakana",
            Script::Han => "han",
            Script::Cyrillic => "cyrillic",
            Script::Arabic => "arabic",
            Script::Thai => "thai",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Script::Hangul => "hangul",
            Script::Hiragana => "hiragana",
            Script::Katakana => "katakana",
            Script::Han => "han",
            Script::Cyrillic => "cyrillic",
            Script::Arabic => "arabic",
            Script::Thai => "thai",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Script {
    type Err = SieveError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Script::ALL
            .iter()
            .copied()
            .find(|script| script.name() == lower || script.file_tag() == lower)
            .ok_or_else(|| SieveError::Validation(format!("Unknown script: {}", s)))
    }
}

/// Character-class membership test applied to raw comment text
#[derive(Debug, Clone)]
pub struct ScriptFilter {
    regex: Regex,
    tag: String,
}

impl ScriptFilter {
    /// Filter for a named script
    pub fn new(script: Script) -> Self {
        Self {
            regex: Regex::new(script.pattern()).expect("built-in script pattern compiles"),
            tag: script.file_tag().to_string(),
        }
    }

    /// Filter from a user-supplied pattern
    pub fn custom(pattern: &str, tag: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            SieveError::Config(format!("Invalid filter pattern '{}': {}", pattern, e))
        })?;
        Ok(Self {
            regex,
            tag: tag.into(),
        })
    }

    /// True if `text` contains at least one matching character
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for ScriptFilter {
    fn default() -> Self {
        Self::new(Script::default())
    }
}

/// Outcome of classifying one comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Written by the video owner; goes nowhere
    Excluded,
    /// Goes to the "all" output only
    IncludedAll,
    /// Goes to both the "all" and the "filtered" outputs
    IncludedFiltered,
}

impl Classification {
    pub fn in_all(&self) -> bool {
        !matches!(self, Classification::Excluded)
    }

    pub fn in_filtered(&self) -> bool {
        matches!(self, Classification::IncludedFiltered)
    }
}

/// Classify a single comment against the owner and filter
pub fn classify(comment: &Comment, owner: &ChannelId, filter: &ScriptFilter) -> Classification {
    if comment.is_by(owner) {
        Classification::Excluded
    } else if filter.matches(&comment.text) {
        Classification::IncludedFiltered
    } else {
        Classification::IncludedAll
    }
}

/// Both output sets, in API response order
#[derive(Debug, Default)]
pub struct ClassifiedComments<'a> {
    pub all: Vec<&'a Comment>,
    pub filtered: Vec<&'a Comment>,
    pub excluded: usize,
}

/// Classify every comment, preserving order
pub fn partition<'a>(
    comments: &'a [Comment],
    owner: &ChannelId,
    filter: &ScriptFilter,
) -> ClassifiedComments<'a> {
    let mut out = ClassifiedComments::default();
    for comment in comments {
        let class = classify(comment, owner, filter);
        if class.in_all() {
            out.all.push(comment);
        } else {
            out.excluded += 1;
        }
        if class.in_filtered() {
            out.filtered.push(comment);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn comment(author: &str, text: &str, channel: &str) -> Comment {
        Comment::new(author, text, ChannelId::from_string(channel))
    }

    #[test]
    fn test_owner_excluded_even_with_hangul() {
        let owner = ChannelId::from_string("OWNER");
        let c = comment("Owner", "안녕", "OWNER");
        assert_eq!(classify(&c, &owner, &ScriptFilter::default()), Classification::Excluded);
    }

    #[test]
    fn test_single_hangul_char_suffices() {
        let owner = ChannelId::from_string("OWNER");
        let c = comment("Bob", "great video 좋", "B1");
        assert_eq!(
            classify(&c, &owner, &ScriptFilter::default()),
            Classification::IncludedFiltered
        );
    }

    #[test]
    fn test_hangul_jamo_not_matched() {
        // Compatibility jamo (ㅋ) sit outside the syllables block.
        let owner = ChannelId::from_string("OWNER");
        let c = comment("Bob", "ㅋㅋㅋ", "B1");
        assert_eq!(
            classify(&c, &owner, &ScriptFilter::default()),
            Classification::IncludedAll
        );
    }

    #[test]
    fn test_scenario_partition() {
        let owner = ChannelId::from_string("OWNER");
        let comments = vec![
            comment("OWNER", "spam", "OWNER"),
            comment("Alice", "Hello world", "A1"),
            comment("Bob", "안녕하세요", "B1"),
        ];
        let out = partition(&comments, &owner, &ScriptFilter::default());

        let all: Vec<&str> = out.all.iter().map(|c| c.author.as_str()).collect();
        let filtered: Vec<&str> = out.filtered.iter().map(|c| c.author.as_str()).collect();
        assert_eq!(all, vec!["Alice", "Bob"]);
        assert_eq!(filtered, vec!["Bob"]);
        assert_eq!(out.excluded, 1);
    }

    #[test]
    fn test_partition_preserves_order_and_duplicates() {
        let owner = ChannelId::from_string("OWNER");
        let comments = vec![
            comment("C", "감사", "C1"),
            comment("A", "thanks", "A1"),
            comment("C", "감사", "C1"),
        ];
        let out = partition(&comments, &owner, &ScriptFilter::default());
        assert_eq!(out.all.len(), 3);
        assert_eq!(out.filtered.len(), 2);
        assert_eq!(out.all[1].author, "A");
    }

    #[test]
    fn test_partition_empty() {
        let out = partition(&[], &ChannelId::from_string("X"), &ScriptFilter::default());
        assert!(out.all.is_empty());
        assert!(out.filtered.is_empty());
    }

    #[test]
    fn test_other_scripts() {
        assert!(ScriptFilter::new(Script::Hiragana).matches("ありがとう"));
        assert!(ScriptFilter::new(Script::Katakana).matches("カタカナ"));
        assert!(ScriptFilter::new(Script::Han).matches("漢字"));
        assert!(ScriptFilter::new(Script::Cyrillic).matches("привет"));
        assert!(!ScriptFilter::new(Script::Cyrillic).matches("hello"));
    }

    #[test]
    fn test_script_from_str() {
        assert_eq!("hangul".parse::<Script>().unwrap(), Script::Hangul);
        assert_eq!("Korean".parse::<Script>().unwrap(), Script::Hangul);
        assert_eq!("han".parse::<Script>().unwrap(), Script::Han);
        assert!("klingon".parse::<Script>().is_err());
    }

    #[test]
    fn test_custom_filter() {
        let f = ScriptFilter::custom(r"[0-9]", "digits").unwrap();
        assert!(f.matches("route 66"));
        assert_eq!(f.tag(), "digits");
        assert!(ScriptFilter::custom("[unclosed", "x").is_err());
    }

    #[test]
    fn test_script_serde() {
        let json = serde_json::to_string(&Script::Cyrillic).unwrap();
        assert_eq!(json, "\"cyrillic\"");
    }
}
