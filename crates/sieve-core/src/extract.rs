//! Video id extraction from user-supplied URLs

use crate::error::{Result, SieveError};
use crate::types::VideoId;

/// Primary marker: the id follows it up to the next `&`
const WATCH_MARKER: &str = "youtube.com/watch?v=";

/// Watch URL whose `v` parameter is not the first one
const WATCH_QUERY_MARKER: &str = "youtube.com/watch?";

/// Path-style URLs where the id is the next path segment
const PATH_MARKERS: &[&str] = &["youtu.be/", "youtube.com/shorts/", "youtube.com/embed/"];

/// Extract the video id from a URL.
///
/// Returns `None` when no marker is present or the id after it is empty.
/// The id itself is not validated.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    let url = url.trim();

    if let Some(pos) = url.find(WATCH_MARKER) {
        let rest = &url[pos + WATCH_MARKER.len()..];
        return non_empty(rest.split('&').next().unwrap_or(""));
    }

    if let Some(pos) = url.find(WATCH_QUERY_MARKER) {
        let query = &url[pos + WATCH_QUERY_MARKER.len()..];
        return query
            .split('&')
            .find_map(|param| param.strip_prefix("v="))
            .and_then(non_empty);
    }

    for marker in PATH_MARKERS {
        if let Some(pos) = url.find(marker) {
            let rest = &url[pos + marker.len()..];
            let id = rest
                .split(|c| matches!(c, '?' | '&' | '#' | '/'))
                .next()
                .unwrap_or("");
            return non_empty(id);
        }
    }

    None
}

/// Like [`extract_video_id`], but reports failure as [`SieveError::Extraction`]
pub fn parse_video_url(url: &str) -> Result<VideoId> {
    extract_video_id(url).ok_or_else(|| SieveError::Extraction(url.trim().to_string()))
}

fn non_empty(id: &str) -> Option<VideoId> {
    if id.is_empty() {
        None
    } else {
        Some(VideoId::from_string(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(url: &str) -> Option<String> {
        extract_video_id(url).map(|v| v.0)
    }

    #[test]
    fn test_id_up_to_ampersand() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            id("https://www.youtube.com/watch?v=abc&list=PL1&index=2"),
            Some("abc".to_string())
        );
    }

    #[test]
    fn test_id_to_end_of_string() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(id("youtube.com/watch?v=x-y_z"), Some("x-y_z".to_string()));
    }

    #[test]
    fn test_mobile_host() {
        assert_eq!(
            id("https://m.youtube.com/watch?v=abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_no_marker() {
        assert_eq!(id("https://example.com/watch?id=abc"), None);
        assert_eq!(id("not a url"), None);
        assert_eq!(id(""), None);
    }

    #[test]
    fn test_empty_id_is_none() {
        assert_eq!(id("https://www.youtube.com/watch?v="), None);
        assert_eq!(id("https://www.youtube.com/watch?v=&t=1"), None);
    }

    #[test]
    fn test_v_as_later_parameter() {
        assert_eq!(
            id("https://www.youtube.com/watch?feature=share&v=abc123&t=5"),
            Some("abc123".to_string())
        );
        assert_eq!(id("https://www.youtube.com/watch?feature=share"), None);
    }

    #[test]
    fn test_path_style_urls() {
        assert_eq!(id("https://youtu.be/abc123?si=xyz"), Some("abc123".to_string()));
        assert_eq!(
            id("https://www.youtube.com/shorts/short1/"),
            Some("short1".to_string())
        );
        assert_eq!(
            id("https://www.youtube.com/embed/emb1#start"),
            Some("emb1".to_string())
        );
        assert_eq!(id("https://youtu.be/"), None);
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(
            id("  https://www.youtube.com/watch?v=abc\n"),
            Some("abc".to_string())
        );
    }

    #[test]
    fn test_parse_video_url_error() {
        let err = parse_video_url("https://vimeo.com/123").unwrap_err();
        assert!(matches!(err, SieveError::Extraction(ref u) if u == "https://vimeo.com/123"));
    }
}
