//! # Research Notes
//!
//! Resilient conversion of LLM-generated "research notes" into structured
//! records with validated citations.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures ([`ResearchNote`], [`NoteSource`])
//! - [`parser`]: Line-oriented section scanner for raw model output
//! - [`extract`]: Fallback source extraction from raw search-result text
//! - [`agent`]: [`NoteDistiller`], composing parse, fallback, and validation
//! - [`utils`]: URL validation and normalization
//! - [`config`]: Threshold configuration
//! - [`ui`]: Terminal rendering
//!
//! The crate performs no I/O of its own: the model completion and the search
//! snippets arrive as plain strings from external collaborators, and every
//! call is synchronous, stateless, and safe to run concurrently.

pub mod agent;
pub mod config;
pub mod extract;
pub mod models;
pub mod parser;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use agent::{ContractError, NoteDistiller};
pub use models::{NoteSource, ResearchNote};
pub use parser::NoteParser;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
