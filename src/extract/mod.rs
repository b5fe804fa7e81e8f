//! Fallback source extraction from raw search-result text.
//!
//! When the model's note cites too few sources, the raw search snippets are
//! re-scanned for URLs, and a human-readable title is recovered from the text
//! surrounding each one. Every candidate still has to pass the conservative
//! URL filter before it becomes a citation.

use std::collections::HashSet;

use regex::Regex;
use url::Url;

use crate::config::ParserConfig;
use crate::models::NoteSource;
use crate::utils::is_valid_source_url;

/// URL-shaped substrings: scheme plus anything that is not whitespace or a
/// delimiter character.
const URL_PATTERN: &str = r#"https?://[^\s<>"{}|\\^`\[\]]+"#;

/// Harvested URLs shorter than this are noise (truncated matches, bare hosts).
const MIN_HARVESTED_URL_LEN: usize = 10;

/// Recovered titles must be longer than this to be kept.
const MIN_RECOVERED_TITLE_LEN: usize = 5;

/// Separators that commonly precede a page title in search snippets.
const TITLE_SEPARATORS: [&str; 4] = [" - ", " | ", " :: ", " – "];

/// Extracts candidate sources from raw search-result text.
#[derive(Debug, Clone, Default)]
pub struct FallbackExtractor {
    config: ParserConfig,
}

impl FallbackExtractor {
    /// Create an extractor with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with explicit thresholds.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Scan `search_text` for additional sources.
    ///
    /// `already_found` is how many sources the primary parse produced; the
    /// scan stops once found plus extracted reaches the minimum threshold,
    /// and never considers more than the configured maximum of candidate
    /// URLs. Returns the accepted sources in first-seen order. The caller is
    /// responsible for skipping URLs it already holds.
    pub fn extract(&self, search_text: &str, already_found: usize) -> Vec<NoteSource> {
        let Ok(url_pattern) = Regex::new(URL_PATTERN) else {
            return Vec::new();
        };

        // First-seen-order dedup on the literal matched string.
        let mut seen: HashSet<&str> = HashSet::new();
        let mut candidates: Vec<(usize, &str)> = Vec::new();
        for m in url_pattern.find_iter(search_text) {
            let url = m.as_str();
            if url.len() > MIN_HARVESTED_URL_LEN && seen.insert(url) {
                candidates.push((m.start(), url));
            }
        }
        tracing::debug!("found {} unique candidate urls in search text", candidates.len());

        let mut extracted = Vec::new();
        for (pos, url) in candidates.into_iter().take(self.config.max_fallback_sources) {
            let context = self.context_window(search_text, pos, url.len());
            let title = recover_title(&context.replace(url, ""), url);

            if title.len() > MIN_RECOVERED_TITLE_LEN && is_valid_source_url(url) {
                tracing::debug!("extracted source: '{}' -> '{}'", title, url);
                extracted.push(NoteSource::new(title, url));
                if already_found + extracted.len() >= self.config.min_sources {
                    break;
                }
            }
        }

        extracted
    }

    /// Bounded window of text around a URL occurrence, snapped to character
    /// boundaries.
    fn context_window<'a>(&self, text: &'a str, pos: usize, url_len: usize) -> &'a str {
        let mut start = pos.saturating_sub(self.config.context_radius);
        let mut end = (pos + url_len + self.config.context_radius).min(text.len());
        while !text.is_char_boundary(start) {
            start -= 1;
        }
        while !text.is_char_boundary(end) {
            end += 1;
        }
        &text[start..end]
    }
}

/// Recover a human-readable title from the context around a URL, trying
/// quoted text, parenthesized text, capitalized sentences, and
/// separator-delimited prefixes in that order before falling back to the
/// URL's host.
fn recover_title(context: &str, url: &str) -> String {
    if let Some(title) = first_capture(r#""([^"]{10,100})""#, context) {
        return title;
    }
    if let Some(title) = first_capture(r"\(([^)]{10,100})\)", context) {
        return title;
    }
    if let Some(title) = longest_sentence(context) {
        return title;
    }
    for sep in TITLE_SEPARATORS {
        if let Some((before, _)) = context.split_once(sep) {
            let candidate = before.trim();
            if candidate.len() > 10 {
                return candidate.to_string();
            }
        }
    }
    domain_title(url)
}

fn first_capture(pattern: &str, text: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Longest capitalized sentence-shaped span, kept only when it is long enough
/// to look like a title rather than a fragment.
fn longest_sentence(text: &str) -> Option<String> {
    let re = Regex::new(r"([A-Z][^.!?]{10,100}[.!?])").ok()?;
    let best = re
        .find_iter(text)
        .map(|m| m.as_str())
        .max_by_key(|s| s.len())?;
    if best.len() > 15 {
        Some(best.trim().to_string())
    } else {
        None
    }
}

fn domain_title(url: &str) -> String {
    match Url::parse(url).ok().and_then(|u| u.host_str().map(String::from)) {
        Some(host) => {
            let domain = host.strip_prefix("www.").unwrap_or(&host);
            format!("Article from {}", domain)
        }
        None => "Source".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_url_with_quoted_title() {
        let text = r#"Top result: "Advances in Battery Chemistry" https://energy.review.org/batteries more text"#;
        let sources = FallbackExtractor::new().extract(text, 0);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].title, "Advances in Battery Chemistry");
        assert_eq!(sources[0].url, "https://energy.review.org/batteries");
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let text = "see https://alpha.news.org/item1 then https://beta.news.org/item2 and again https://alpha.news.org/item1";
        let sources = FallbackExtractor::new().extract(text, 0);
        let urls: Vec<&str> = sources.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://alpha.news.org/item1", "https://beta.news.org/item2"]
        );
    }

    #[test]
    fn test_stops_at_minimum_threshold() {
        let text = "https://one.site.org/aaaa https://two.site.org/bbbb https://three.site.org/cccc https://four.site.org/dddd";
        let sources = FallbackExtractor::new().extract(text, 0);
        assert_eq!(sources.len(), 3);
    }

    #[test]
    fn test_already_found_counts_toward_threshold() {
        let text = "https://one.site.org/aaaa https://two.site.org/bbbb";
        let sources = FallbackExtractor::new().extract(text, 2);
        assert_eq!(sources.len(), 1);
    }

    #[test]
    fn test_invalid_urls_filtered() {
        let text = "placeholder link https://example.com/fake and real https://climate.data.org/report2024";
        let sources = FallbackExtractor::new().extract(text, 0);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url, "https://climate.data.org/report2024");
    }

    #[test]
    fn test_domain_fallback_title() {
        // No quotes, parens, capitalized sentence, or separator nearby.
        let text = "xxxx https://www.archive.research.net/item/42 yyyy";
        let sources = FallbackExtractor::new().extract(text, 0);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].title, "Article from archive.research.net");
    }

    #[test]
    fn test_separator_title() {
        let text = "Deep Sea Mining Update | https://ocean.journal.org/mining latest findings";
        let sources = FallbackExtractor::new().extract(text, 0);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].title, "Deep Sea Mining Update");
    }

    #[test]
    fn test_empty_and_urlless_text() {
        let extractor = FallbackExtractor::new();
        assert!(extractor.extract("", 0).is_empty());
        assert!(extractor.extract("no links in here at all", 0).is_empty());
    }
}
