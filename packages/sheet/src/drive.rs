//! Google Drive share-link rewriting.
//!
//! Admins paste whatever share URL the Drive UI hands them; browsers can't
//! render those directly as `<img>` sources. Any URL matching a known
//! share-link shape is rewritten to the direct-content endpoint, extracting
//! the file id from the first pattern that matches. URLs that match nothing
//! pass through unchanged.

use std::sync::LazyLock;

use regex::Regex;

/// `/file/d/{id}` path segment.
static FILE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"drive\.google\.com/file/d/([A-Za-z0-9_-]+)").expect("valid regex")
});

/// `?id={id}` / `&id={id}` query parameter (the `open?id=` form).
static QUERY_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"drive\.google\.com/\S*[?&]id=([A-Za-z0-9_-]+)").expect("valid regex")
});

/// `/d/{id}` short-link path.
static SHORT_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"drive\.google\.com/d/([A-Za-z0-9_-]+)").expect("valid regex")
});

/// File-id extractors in priority order.
static ID_PATTERNS: &[&LazyLock<Regex>] = &[&FILE_PATH_RE, &QUERY_ID_RE, &SHORT_PATH_RE];

/// Rewrites a Drive share link to its direct-content form; first matching
/// pattern wins. Non-Drive URLs are returned unchanged.
#[must_use]
pub fn direct_image_url(url: &str) -> String {
    let trimmed = url.trim();
    for pattern in ID_PATTERNS {
        if let Some(caps) = pattern.captures(trimmed) {
            return format!("https://drive.google.com/uc?export=view&id={}", &caps[1]);
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_file_path_form() {
        assert_eq!(
            direct_image_url("https://drive.google.com/file/d/1AbC_d-9/view?usp=sharing"),
            "https://drive.google.com/uc?export=view&id=1AbC_d-9"
        );
    }

    #[test]
    fn rewrites_open_id_form() {
        assert_eq!(
            direct_image_url("https://drive.google.com/open?id=1AbC_d-9"),
            "https://drive.google.com/uc?export=view&id=1AbC_d-9"
        );
    }

    #[test]
    fn rewrites_short_path_form() {
        assert_eq!(
            direct_image_url("https://drive.google.com/d/1AbC_d-9"),
            "https://drive.google.com/uc?export=view&id=1AbC_d-9"
        );
    }

    #[test]
    fn non_drive_url_passes_through() {
        assert_eq!(
            direct_image_url("https://cdn.example.com/photo.jpg"),
            "https://cdn.example.com/photo.jpg"
        );
    }

    #[test]
    fn plain_id_query_elsewhere_passes_through() {
        assert_eq!(
            direct_image_url("https://example.com/open?id=123"),
            "https://example.com/open?id=123"
        );
    }
}
