//! URL validation and normalization for cited sources.
//!
//! Language models frequently emit placeholder citations ("example.com",
//! "no url", bare schemes) alongside real ones. The filter here is deliberately
//! conservative: a URL is only accepted when it is syntactically well-formed,
//! carries no placeholder signature, and has a plausible length.

use regex::Regex;

/// Strict syntactic shape: scheme, dotted host with an alphabetic top-level
/// label of 2+ characters, optional path free of delimiter characters.
const URL_SHAPE: &str =
    r#"^https?://[^\s<>"{}|\\^`\[\]]+\.[a-zA-Z]{2,}(/[^\s<>"{}|\\^`\[\]]*)?$"#;

/// Placeholder signatures the model emits instead of a real citation.
/// Matched case-insensitively as substrings.
const PLACEHOLDER_SIGNATURES: &[&str] =
    &["no%20url", "example.com", "placeholder", "...", "%20%20"];

const MIN_URL_LEN: usize = 15;
const MAX_URL_LEN: usize = 500;

/// Validate a source URL against the syntactic pattern, the placeholder
/// blacklist, and the length bounds. Fails closed: any evaluation problem
/// (including a regex that will not compile) rejects the URL.
pub fn is_valid_source_url(url: &str) -> bool {
    let Ok(shape) = Regex::new(URL_SHAPE) else {
        return false;
    };
    if !shape.is_match(url) {
        return false;
    }

    let lowered = url.to_lowercase();
    if PLACEHOLDER_SIGNATURES.iter().any(|sig| lowered.contains(sig)) {
        return false;
    }
    // A bare scheme with nothing after it is never a citation.
    if lowered.ends_with("http://") || lowered.ends_with("https://") {
        return false;
    }

    (MIN_URL_LEN..=MAX_URL_LEN).contains(&url.len())
}

/// Normalize a URL extracted from a source line.
///
/// Strips embedded spaces and encoded-space sequences, then coerces `https://`
/// onto schemeless but domain-shaped text. Text that is neither schemed nor
/// domain-shaped is discarded (empty string) rather than guessed at.
pub fn normalize_url(raw: &str) -> String {
    let cleaned: String = raw.replace(' ', "").replace("%20", "");
    if cleaned.is_empty() {
        return cleaned;
    }

    if cleaned.starts_with("http://") || cleaned.starts_with("https://") {
        cleaned
    } else if cleaned.contains('.') {
        format!("https://{}", cleaned)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(is_valid_source_url("https://news.site.org/a1"));
        assert!(is_valid_source_url("http://export.arxiv.org/api/query"));
        assert!(is_valid_source_url("https://healthai.example.org/report"));
    }

    #[test]
    fn test_placeholder_urls_rejected() {
        assert!(!is_valid_source_url("https://example.com/page"));
        assert!(!is_valid_source_url("https://site.org/no%20url/page"));
        assert!(!is_valid_source_url("https://articles.net/placeholder/1"));
        assert!(!is_valid_source_url("https://site.org/story/..."));
    }

    #[test]
    fn test_bare_scheme_rejected() {
        assert!(!is_valid_source_url("http://"));
        assert!(!is_valid_source_url("https://"));
    }

    #[test]
    fn test_shape_rejected() {
        assert!(!is_valid_source_url(""));
        assert!(!is_valid_source_url("ftp://files.site.org/a"));
        assert!(!is_valid_source_url("https://nodots/path"));
        assert!(!is_valid_source_url("https://bad host.org/space"));
        assert!(!is_valid_source_url("https://site.org/<angle>"));
    }

    #[test]
    fn test_length_bounds() {
        // Well-formed but shorter than 15 characters
        assert!(!is_valid_source_url("https://ab.cd"));
        let long = format!("https://site.org/{}", "a".repeat(500));
        assert!(!is_valid_source_url(&long));
    }

    #[test]
    fn test_normalize_url_scheme_coercion() {
        assert_eq!(normalize_url("example2.com"), "https://example2.com");
        assert_eq!(normalize_url("https://site.org/a b"), "https://site.org/ab");
        assert_eq!(normalize_url("site.org/x%20y"), "https://site.org/xy");
    }

    #[test]
    fn test_normalize_url_discards_non_domains() {
        assert_eq!(normalize_url("not a url"), "");
        assert_eq!(normalize_url(""), "");
    }
}
