//! Utility modules supporting note parsing.
//!
//! - [`is_valid_source_url`]: conservative accept/reject filter for citation URLs
//! - [`normalize_url`]: space stripping and scheme coercion for extracted URLs

mod validate;

pub use validate::{is_valid_source_url, normalize_url};
