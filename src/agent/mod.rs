//! Composition of the note parser and the fallback extractor.
//!
//! The distiller is the crate's front door: it takes the two raw strings the
//! external collaborators produce (the model completion and the concatenated
//! search snippets), runs the primary parse, tops up the citation list from
//! the search text when the parse came up short, and checks the structural
//! output contract before handing the note back.

use std::collections::HashSet;

use thiserror::Error;

use crate::config::ParserConfig;
use crate::extract::FallbackExtractor;
use crate::models::{NoteSource, ResearchNote};
use crate::parser::NoteParser;

/// Field keys every serialized note must carry.
const REQUIRED_FIELDS: [&str; 4] = ["title", "summary", "key_points", "sources"];

/// Structural-contract violations.
///
/// These indicate a defect in the parser itself, never bad model output; all
/// model misbehavior degrades to field defaults long before this point.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("note serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Turns raw model output and raw search text into a validated research note.
#[derive(Debug, Clone, Default)]
pub struct NoteDistiller {
    config: ParserConfig,
    parser: NoteParser,
    extractor: FallbackExtractor,
}

impl NoteDistiller {
    /// Create a distiller with default thresholds.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a distiller with explicit thresholds, shared by the parser and
    /// the extractor.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            parser: NoteParser::with_config(config.clone()),
            extractor: FallbackExtractor::with_config(config.clone()),
            config,
        }
    }

    /// Parse `raw_model_text` into a structured note, merging in sources
    /// harvested from `raw_search_text` when the parse found fewer than the
    /// minimum threshold.
    pub fn distill(
        &self,
        raw_model_text: &str,
        raw_search_text: &str,
    ) -> Result<ResearchNote, ContractError> {
        let mut note = self.parser.parse(raw_model_text).note;

        if note.sources.len() < self.config.min_sources && !raw_search_text.is_empty() {
            tracing::info!(
                "only {} sources parsed, scanning search text for more",
                note.sources.len()
            );
            let extracted = self.extractor.extract(raw_search_text, note.sources.len());
            merge_sources(&mut note.sources, extracted);
        }

        validate_contract(&note)?;
        log_quality_warnings(&note);
        Ok(note)
    }

    /// The record returned when the search collaborator produced nothing:
    /// a query-tagged title, the failure message as the summary, and a single
    /// explanatory key point.
    pub fn empty_note(&self, query: &str, message: &str) -> ResearchNote {
        ResearchNote {
            title: format!("Research Results: {}", query),
            summary: message.to_string(),
            key_points: vec!["No key points available due to search failure".to_string()],
            sources: Vec::new(),
        }
    }
}

/// Append extracted sources, skipping URLs already present. Keyed on the raw
/// URL string only; titles are not compared.
fn merge_sources(sources: &mut Vec<NoteSource>, extracted: Vec<NoteSource>) {
    let existing: HashSet<String> = sources
        .iter()
        .filter(|s| s.has_url())
        .map(|s| s.url.clone())
        .collect();

    for source in extracted {
        if !existing.contains(&source.url) {
            sources.push(source);
        }
    }
}

/// Verify the serialized note carries every required field key.
fn validate_contract(note: &ResearchNote) -> Result<(), ContractError> {
    let value = serde_json::to_value(note)?;
    for field in REQUIRED_FIELDS {
        if value.get(field).is_none() {
            tracing::error!("structured note missing required field '{}'", field);
            return Err(ContractError::MissingField(field));
        }
    }
    Ok(())
}

/// Non-fatal quality signals: the note is usable, but generic.
fn log_quality_warnings(note: &ResearchNote) {
    if note.has_default_title() {
        tracing::warn!("research title is generic or empty");
    }
    if note.has_default_summary() {
        tracing::warn!("research summary is empty or generic");
    }
    if note.key_points.is_empty() {
        tracing::warn!("no key points found in research results");
    }
    if note.sources.is_empty() {
        tracing::warn!("no sources found in research results");
    }
}
