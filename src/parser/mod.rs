//! Line-oriented parsing of model-generated research notes.
//!
//! The prompt asks the model for a fixed template (`TITLE:`, `SUMMARY:`,
//! `KEY POINTS:`, `SOURCES:`), but real completions drift: markers change
//! case, bullets go missing, commentary gets appended. The scanner here is
//! permissive about section detection and strict about content, so format
//! drift degrades output quality instead of breaking it.

mod note;
mod source_line;

pub use note::NoteParser;
pub use source_line::parse_source_line;
