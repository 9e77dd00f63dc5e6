//! Errors raised while building a vocabulary registry.
//!
//! Parsing itself never fails; every error here is a configuration problem
//! detected while loading the vocabulary table.

/// Configuration error raised while loading vocabulary data.
///
/// Every row-level variant carries the 1-based line number of the
/// offending row.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The header row is missing or does not have seven columns.
    #[error("line {line}: expected 7 header columns, got {columns}")]
    Header { line: usize, columns: usize },

    /// The header row has seven columns but unexpected names.
    #[error("line {line}: unexpected header column '{found}', expected '{expected}'")]
    HeaderName {
        line: usize,
        found: String,
        expected: &'static str,
    },

    /// A row does not name a tag.
    #[error("line {line}: must define tag")]
    MissingTag { line: usize },

    /// A row names a category that has no tag type.
    #[error("line {line}: unknown tag category '{category}'")]
    UnknownCategory { line: usize, category: String },

    /// A row repeats a tag already defined in the same category.
    #[error("line {line}: type '{category}' with tag '{tag}' previously defined on line {previous}")]
    DuplicateTag {
        line: usize,
        previous: usize,
        category: String,
        tag: String,
    },

    /// A row names a release type that does not exist.
    #[error("line {line}: invalid release type '{name}'")]
    UnknownReleaseType { line: usize, name: String },

    /// A row carries a pattern that fails to compile.
    #[error("line {line}: tag '{tag}' has invalid regexp '{pattern}': {source}")]
    Pattern {
        line: usize,
        tag: String,
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// A lexer pattern assembled from the vocabulary fails to compile.
    #[error("failed to compile {lexer} lexer: {source}")]
    Lexer {
        lexer: &'static str,
        #[source]
        source: Box<regex::Error>,
    },
}

/// Result alias for registry construction.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_names_both_lines() {
        let err = Error::DuplicateTag {
            line: 9,
            previous: 4,
            category: "source".into(),
            tag: "WEB".into(),
        };
        assert_eq!(
            err.to_string(),
            "line 9: type 'source' with tag 'WEB' previously defined on line 4"
        );
    }

    #[test]
    fn test_missing_tag_message() {
        assert_eq!(
            Error::MissingTag { line: 3 }.to_string(),
            "line 3: must define tag"
        );
    }
}
