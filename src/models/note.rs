//! Research note model: the structured record produced from raw model output.

use serde::{Deserialize, Serialize};

/// Default title used when no `TITLE:` section is found.
pub const DEFAULT_TITLE: &str = "Research Results";

/// Default summary used when no summary text can be recovered.
pub const DEFAULT_SUMMARY: &str = "No summary available";

/// A single cited source: a human-readable title plus an optional URL.
///
/// An empty `url` means "no URL found" rather than an error; the parser keeps
/// title-only citations instead of dropping them. Non-empty URLs have been
/// through scheme coercion, and in validated contexts through the URL filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSource {
    /// Source title (non-empty, more than 3 characters after trimming)
    pub title: String,

    /// Source URL, or the empty string when none was found
    pub url: String,
}

impl NoteSource {
    /// Create a new source.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Create a title-only source with no URL.
    pub fn title_only(title: impl Into<String>) -> Self {
        Self::new(title, "")
    }

    /// Whether this source carries a URL.
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// A structured research note.
///
/// All four fields are always present: a failed or partial parse degrades to the
/// defaults rather than omitting fields, so downstream consumers never need to
/// handle an absent key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchNote {
    /// Note title
    pub title: String,

    /// Prose summary, single-space joined from the summary section lines
    pub summary: String,

    /// Key points in document order
    pub key_points: Vec<String>,

    /// Cited sources in document order (duplicates permitted)
    pub sources: Vec<NoteSource>,
}

impl ResearchNote {
    /// Returns how many sources carry a non-empty URL.
    pub fn cited_source_count(&self) -> usize {
        self.sources.iter().filter(|s| s.has_url()).count()
    }

    /// Whether the title is still the generic default.
    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_TITLE
    }

    /// Whether the summary is still the generic default.
    pub fn has_default_summary(&self) -> bool {
        self.summary == DEFAULT_SUMMARY
    }
}

impl Default for ResearchNote {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            summary: DEFAULT_SUMMARY.to_string(),
            key_points: Vec::new(),
            sources: Vec::new(),
        }
    }
}

/// Records which fields of a parsed note were left at their defaults.
///
/// The public contract only exposes the note itself; this record is an internal
/// confidence signal so callers (and tests) can distinguish "the model wrote an
/// empty key-point list" from "we never found the section".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultedFields {
    pub title: bool,
    pub summary: bool,
    pub key_points: bool,
    pub sources: bool,
}

impl DefaultedFields {
    /// All four fields defaulted (the total-failure case).
    pub fn all() -> Self {
        Self {
            title: true,
            summary: true,
            key_points: true,
            sources: true,
        }
    }

    /// True when every field was recovered from the input.
    pub fn none_defaulted(&self) -> bool {
        !(self.title || self.summary || self.key_points || self.sources)
    }
}

/// A parse result: the note plus the record of which fields fell back to defaults.
#[derive(Debug, Clone)]
pub struct ParsedNote {
    pub note: ResearchNote,
    pub defaulted: DefaultedFields,
}

impl ParsedNote {
    /// An all-defaults note, used for inputs too short or too broken to parse.
    pub fn empty() -> Self {
        Self {
            note: ResearchNote::default(),
            defaulted: DefaultedFields::all(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_note_fields() {
        let note = ResearchNote::default();
        assert_eq!(note.title, "Research Results");
        assert_eq!(note.summary, "No summary available");
        assert!(note.key_points.is_empty());
        assert!(note.sources.is_empty());
        assert!(note.has_default_title());
        assert!(note.has_default_summary());
    }

    #[test]
    fn test_cited_source_count() {
        let note = ResearchNote {
            sources: vec![
                NoteSource::new("With URL", "https://news.site.org/a1"),
                NoteSource::title_only("Title only"),
            ],
            ..Default::default()
        };
        assert_eq!(note.cited_source_count(), 1);
    }

    #[test]
    fn test_serialization_has_all_keys() {
        let value = serde_json::to_value(ResearchNote::default()).unwrap();
        for key in ["title", "summary", "key_points", "sources"] {
            assert!(value.get(key).is_some(), "missing key: {}", key);
        }
    }

    #[test]
    fn test_defaulted_fields() {
        assert!(DefaultedFields::default().none_defaulted());
        assert!(!DefaultedFields::all().none_defaulted());
    }
}
