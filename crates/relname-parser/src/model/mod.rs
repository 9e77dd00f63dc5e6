//! Data model types for parsed release names.
//!
//! This module contains the token categories, release types, lexed tokens
//! and the [`Release`] record produced by the parser.

mod release;
mod release_type;
mod tag;
mod tag_type;

pub use release::{Release, ReleaseSummary};
pub use release_type::ReleaseType;
pub use tag::Tag;
pub(crate) use tag::parse_int;
pub use tag_type::TagType;

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse error: {}", self.0)
    }
}

impl std::error::Error for ParseError {}
