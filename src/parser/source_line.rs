//! Parsing of individual source lines from the `SOURCES:` section.

use crate::models::NoteSource;
use crate::utils::normalize_url;

/// Title strings the model emits when it failed to produce a real title.
const TITLE_SENTINELS: &[&str] = &["source title", "no title"];

/// Parse a single source line into a [`NoteSource`].
///
/// The line is expected to be trimmed and to start with `[`, in one of the
/// shapes the prompt asks the model for:
///
/// - `[1] Title (URL)`
/// - `[2] Title - URL`
/// - `[3] Title`
///
/// `accepted_so_far` is the number of sources already accepted for this note;
/// it seeds the `Source {n}` substitute when the title is empty or a known
/// sentinel. Returns `None` for lines whose title is too short to be
/// meaningful, so malformed lines never produce ghost entries.
pub fn parse_source_line(line: &str, accepted_so_far: usize) -> Option<NoteSource> {
    // Strip the leading [n] index. A line without a closing bracket is
    // treated as unindexed content.
    let content = match line.find(']') {
        Some(pos) => line[pos + 1..].trim(),
        None => line.trim(),
    };

    let (raw_title, raw_url) = split_title_and_url(content);

    let mut title = raw_title.trim().to_string();
    if title.is_empty() || is_title_sentinel(&title) {
        title = format!("Source {}", accepted_so_far + 1);
    }

    let url = normalize_url(raw_url);

    if title.trim().len() > 3 {
        Some(NoteSource::new(title, url))
    } else {
        tracing::debug!("dropping source line with unusable title: '{}'", line);
        None
    }
}

/// Split source-line content into `(title, url)`, trying formats in order:
/// `Title (URL)`, then `Title - URL`, then title-only.
fn split_title_and_url(content: &str) -> (&str, &str) {
    // Title (URL): the URL sits between the last '(' and the ')' after it.
    // Earlier parens belong to the title itself.
    if let Some(open) = content.rfind('(') {
        if let Some(close) = content[open + 1..].find(')') {
            let url = &content[open + 1..open + 1 + close];
            let title = &content[..open];
            return (title, url);
        }
    }

    // Title - URL
    if let Some((title, url)) = content.split_once(" - ") {
        return (title, url.trim());
    }

    // Title only
    (content, "")
}

fn is_title_sentinel(title: &str) -> bool {
    let lowered = title.to_lowercase();
    TITLE_SENTINELS.iter().any(|s| lowered == *s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_paren_format() {
        let src = parse_source_line("[1] Example Paper (https://example1.com/article)", 0)
            .expect("source");
        assert_eq!(src.title, "Example Paper");
        assert_eq!(src.url, "https://example1.com/article");
    }

    #[test]
    fn test_bracket_dash_format_adds_scheme() {
        let src = parse_source_line("[2] Example Paper - example2.com", 0).expect("source");
        assert_eq!(src.title, "Example Paper");
        assert_eq!(src.url, "https://example2.com");
    }

    #[test]
    fn test_title_only() {
        let src = parse_source_line("[3] Untitled", 0).expect("source");
        assert_eq!(src.title, "Untitled");
        assert_eq!(src.url, "");
    }

    #[test]
    fn test_missing_index_bracket() {
        let src = parse_source_line("[Deep Learning Review (https://reviews.ai.org/dl)", 0);
        // No ']' at all: the whole line is content, and the paren pair still parses.
        let src = src.expect("source");
        assert_eq!(src.url, "https://reviews.ai.org/dl");
    }

    #[test]
    fn test_parens_inside_title() {
        let src = parse_source_line(
            "[4] AI (and ML) in Medicine (https://med.ai.org/paper)",
            0,
        )
        .expect("source");
        assert_eq!(src.title, "AI (and ML) in Medicine");
        assert_eq!(src.url, "https://med.ai.org/paper");
    }

    #[test]
    fn test_unclosed_paren_falls_through_to_title_only() {
        let src = parse_source_line("[5] Robotics Quarterly (vol. 3", 0).expect("source");
        assert_eq!(src.title, "Robotics Quarterly (vol. 3");
        assert_eq!(src.url, "");
    }

    #[test]
    fn test_empty_title_substituted() {
        let src = parse_source_line("[6] (https://journal.site.org/x)", 2).expect("source");
        assert_eq!(src.title, "Source 3");
        assert_eq!(src.url, "https://journal.site.org/x");
    }

    #[test]
    fn test_sentinel_title_substituted() {
        let src = parse_source_line("[7] Source Title (https://journal.site.org/y)", 0)
            .expect("source");
        assert_eq!(src.title, "Source 1");
    }

    #[test]
    fn test_short_title_dropped() {
        assert!(parse_source_line("[8] ab", 0).is_none());
    }

    #[test]
    fn test_bare_index_gets_substitute_title() {
        // Empty content substitutes the ordinal title before the length gate.
        let src = parse_source_line("[9]", 0).expect("source");
        assert_eq!(src.title, "Source 1");
        assert_eq!(src.url, "");
    }

    #[test]
    fn test_non_domain_url_discarded() {
        let src = parse_source_line("[10] Printed Almanac - second edition", 0).expect("source");
        assert_eq!(src.title, "Printed Almanac");
        assert_eq!(src.url, "");
    }
}
