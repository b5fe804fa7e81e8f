//! Configuration for parsing and fallback extraction thresholds.

use serde::{Deserialize, Serialize};

/// Tunable thresholds for the note parser and fallback extractor.
///
/// Every value has a built-in default matching the reference behavior; each can
/// be overridden with a `RESEARCH_NOTES_*` environment variable. Values that
/// fail to parse fall back to the default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Minimum number of sources before fallback extraction is skipped
    #[serde(default = "default_min_sources")]
    pub min_sources: usize,

    /// Maximum number of sources the fallback extractor will add
    #[serde(default = "default_max_fallback_sources")]
    pub max_fallback_sources: usize,

    /// Characters of context inspected on each side of a harvested URL
    #[serde(default = "default_context_radius")]
    pub context_radius: usize,

    /// Key-point lines at or below this length are discarded as noise
    #[serde(default = "default_min_key_point_len")]
    pub min_key_point_len: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            min_sources: env_or("RESEARCH_NOTES_MIN_SOURCES", default_min_sources()),
            max_fallback_sources: env_or(
                "RESEARCH_NOTES_MAX_FALLBACK_SOURCES",
                default_max_fallback_sources(),
            ),
            context_radius: env_or("RESEARCH_NOTES_CONTEXT_RADIUS", default_context_radius()),
            min_key_point_len: env_or(
                "RESEARCH_NOTES_MIN_KEY_POINT_LEN",
                default_min_key_point_len(),
            ),
        }
    }
}

fn env_or(var: &str, default: usize) -> usize {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_min_sources() -> usize {
    3
}

fn default_max_fallback_sources() -> usize {
    5
}

fn default_context_radius() -> usize {
    200
}

fn default_min_key_point_len() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.min_sources, 3);
        assert_eq!(config.max_fallback_sources, 5);
        assert_eq!(config.context_radius, 200);
        assert_eq!(config.min_key_point_len, 10);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ParserConfig = serde_json::from_str(r#"{"min_sources": 2}"#).unwrap();
        assert_eq!(config.min_sources, 2);
        assert_eq!(config.max_fallback_sources, 5);
    }
}
