//! Section-tracking scanner for model-generated research notes.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::config::ParserConfig;
use crate::models::{DefaultedFields, NoteSource, ParsedNote, ResearchNote, DEFAULT_SUMMARY, DEFAULT_TITLE};
use crate::parser::source_line::parse_source_line;

/// Inputs shorter than this (after trimming) are not worth scanning.
const MIN_INPUT_LEN: usize = 10;

/// Paragraph-fallback summaries must be longer than this to count as prose.
const MIN_FALLBACK_PARAGRAPH_LEN: usize = 50;

const TITLE_MARKER: &str = "TITLE:";
const SUMMARY_MARKER: &str = "SUMMARY:";
const KEY_POINTS_MARKER: &str = "KEY POINTS:";
const SOURCES_MARKER: &str = "SOURCES:";
/// Trailing commentary the model appends after the formal sections; seeing it
/// terminates the scan.
const GUIDELINES_MARKER: &str = "IMPORTANT GUIDELINES:";

const ALL_MARKERS: [&str; 5] = [
    TITLE_MARKER,
    SUMMARY_MARKER,
    KEY_POINTS_MARKER,
    SOURCES_MARKER,
    GUIDELINES_MARKER,
];

/// Which section the scanner is currently accumulating into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Title,
    Summary,
    KeyPoints,
    Sources,
}

/// Parser for the loosely-templated research notes a language model produces.
///
/// The parser is total: it never returns an error for any input. Malformed or
/// missing sections degrade to the field defaults, and an internal panic is
/// caught at the boundary and converted into a defaulted note with an
/// error-marked summary.
#[derive(Debug, Clone, Default)]
pub struct NoteParser {
    config: ParserConfig,
}

impl NoteParser {
    /// Create a parser with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with explicit thresholds.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse raw model output into a structured note.
    pub fn parse(&self, raw_text: &str) -> ParsedNote {
        match catch_unwind(AssertUnwindSafe(|| self.scan(raw_text))) {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::error!("note scan panicked; returning defaulted note");
                ParsedNote {
                    note: ResearchNote {
                        summary: "Error parsing research results".to_string(),
                        ..Default::default()
                    },
                    defaulted: DefaultedFields::all(),
                }
            }
        }
    }

    fn scan(&self, raw_text: &str) -> ParsedNote {
        if raw_text.trim().len() < MIN_INPUT_LEN {
            tracing::debug!("raw text too short to parse ({} chars)", raw_text.trim().len());
            return ParsedNote::empty();
        }

        let mut title = DEFAULT_TITLE.to_string();
        let mut summary = DEFAULT_SUMMARY.to_string();
        let mut key_points: Vec<String> = Vec::new();
        let mut sources: Vec<NoteSource> = Vec::new();

        let mut section = Section::None;
        let mut summary_lines: Vec<String> = Vec::new();

        for raw_line in raw_text.lines() {
            let line = raw_line.trim();

            if let Some(rest) = strip_marker(line, TITLE_MARKER) {
                title = rest.trim().to_string();
                section = Section::Title;
                tracing::debug!("found title: {}", title);
            } else if let Some(rest) = strip_marker(line, SUMMARY_MARKER) {
                section = Section::Summary;
                summary_lines.clear();
                // Prose on the marker line itself opens the summary.
                let rest = rest.trim();
                if !rest.is_empty() {
                    summary_lines.push(rest.to_string());
                }
            } else if strip_marker(line, KEY_POINTS_MARKER).is_some() {
                flush_summary(&mut summary, &mut summary_lines);
                section = Section::KeyPoints;
            } else if strip_marker(line, SOURCES_MARKER).is_some() {
                flush_summary(&mut summary, &mut summary_lines);
                section = Section::Sources;
            } else if strip_marker(line, GUIDELINES_MARKER).is_some() {
                flush_summary(&mut summary, &mut summary_lines);
                break;
            } else {
                match section {
                    Section::Summary => {
                        if !line.is_empty() && is_summary_content(line) {
                            summary_lines.push(line.to_string());
                        }
                    }
                    Section::KeyPoints => {
                        if let Some(body) = line.strip_prefix('-') {
                            let point = body.trim();
                            if point.len() > self.config.min_key_point_len {
                                key_points.push(point.to_string());
                            }
                        }
                    }
                    Section::Sources => {
                        if line.starts_with('[') {
                            if let Some(source) = parse_source_line(line, sources.len()) {
                                tracing::debug!(
                                    "accepted source: '{}' -> '{}'",
                                    source.title,
                                    source.url
                                );
                                sources.push(source);
                            }
                        }
                    }
                    Section::None | Section::Title => {}
                }
            }
        }

        // Covers notes that end inside the summary section.
        flush_summary(&mut summary, &mut summary_lines);

        if summary != DEFAULT_SUMMARY {
            summary = summary.replace(SUMMARY_MARKER, "").trim().to_string();
        }

        // Last resort: take the first substantial paragraph as the summary.
        if summary == DEFAULT_SUMMARY {
            if let Some(paragraph) = fallback_summary(raw_text) {
                tracing::debug!("recovered summary from paragraph fallback");
                summary = paragraph;
            }
        }

        let defaulted = DefaultedFields {
            title: title == DEFAULT_TITLE,
            summary: summary == DEFAULT_SUMMARY,
            key_points: key_points.is_empty(),
            sources: sources.is_empty(),
        };

        ParsedNote {
            note: ResearchNote {
                title,
                summary,
                key_points,
                sources,
            },
            defaulted,
        }
    }
}

/// Case-insensitive prefix match; returns the text after the marker.
fn strip_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let prefix = line.get(..marker.len())?;
    if prefix.eq_ignore_ascii_case(marker) {
        Some(&line[marker.len()..])
    } else {
        None
    }
}

/// Summary lines must be prose: not bullets, not source brackets, not markers.
fn is_summary_content(line: &str) -> bool {
    !line.starts_with('-')
        && !line.starts_with('[')
        && !ALL_MARKERS.iter().any(|m| strip_marker(line, m).is_some())
}

/// Join accumulated summary lines into the summary field, clearing the buffer.
/// A previously flushed summary is not overwritten.
fn flush_summary(summary: &mut String, summary_lines: &mut Vec<String>) {
    if !summary_lines.is_empty() {
        if *summary == DEFAULT_SUMMARY {
            *summary = summary_lines.join(" ").trim().to_string();
        }
        summary_lines.clear();
    }
}

/// First blank-line-separated paragraph long enough to be prose and not itself
/// a section header.
fn fallback_summary(raw_text: &str) -> Option<String> {
    raw_text
        .split("\n\n")
        .map(str::trim)
        .find(|part| {
            part.len() > MIN_FALLBACK_PARAGRAPH_LEN
                && !ALL_MARKERS.iter().any(|m| strip_marker(part, m).is_some())
        })
        .map(str::to_string)
}
