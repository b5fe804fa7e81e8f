//! Core data structures for research notes and their sources.

mod note;

pub use note::{
    DefaultedFields, NoteSource, ParsedNote, ResearchNote, DEFAULT_SUMMARY, DEFAULT_TITLE,
};
