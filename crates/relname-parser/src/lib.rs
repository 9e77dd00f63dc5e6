//! # relname-parser
//!
//! A parser for scene and P2P release names.
//!
//! A release name is split into classified tokens by a chain of lexers
//! driven by a vocabulary table, then a builder reclassifies ambiguous
//! tokens, infers the release type and extracts titles. The token
//! sequence always reproduces the input exactly.
//!
//! ## Quick Start
//!
//! ```
//! use relname_parser::{parse, ReleaseType};
//!
//! let release = parse("The.Matrix.1999.1080p.BluRay.x264-GROUP");
//!
//! assert_eq!(release.release_type, ReleaseType::Movie);
//! assert_eq!(release.title, "The Matrix");
//! assert_eq!(release.year, 1999);
//! assert_eq!(release.group, "GROUP");
//! assert_eq!(release.to_string(), "The.Matrix.1999.1080p.BluRay.x264-GROUP");
//! ```
//!
//! ## Configurable Parsing
//!
//! ```
//! use relname_parser::{Parser, ReleaseType};
//! use relname_parser::config::ParserConfig;
//!
//! let config = ParserConfig::builder()
//!     .type_only(true)
//!     .build();
//!
//! let parser = Parser::new(config);
//! let release = parser.parse("Show.S01E02.720p.HDTV.x264-GROUP");
//! assert_eq!(release.release_type, ReleaseType::Episode);
//! assert!(release.title.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod lexer;
pub mod model;
pub mod normalize;
pub mod registry;

mod builder;

use std::sync::{Arc, LazyLock};

pub use config::ParserConfig;
pub use error::{Error, Result};
pub use lexer::Scanner;
pub use model::{ParseError, Release, ReleaseSummary, ReleaseType, Tag, TagType};
pub use registry::Registry;

static BUILTIN: LazyLock<Arc<Scanner>> = LazyLock::new(|| {
    Scanner::new(Registry::builtin())
        .map(Arc::new)
        .unwrap_or_else(|e| panic!("built-in vocabulary is invalid: {}", e))
});

/// Parse a release name using the built-in vocabulary and default settings.
///
/// # Examples
///
/// ```
/// use relname_parser::parse;
///
/// let release = parse("Artist-Album-2004-FLAC-GROUP");
/// assert_eq!(release.artist, "Artist");
/// assert_eq!(release.title, "Album");
/// ```
pub fn parse(input: &str) -> Release {
    Parser::default().parse(input)
}

/// Infer only the release type of a name.
///
/// ```
/// use relname_parser::{parse_type, ReleaseType};
///
/// assert_eq!(parse_type("Movie.2010.1080p.BluRay.x264-GROUP"), ReleaseType::Movie);
/// ```
pub fn parse_type(input: &str) -> ReleaseType {
    Parser::default().parse_type_only(input)
}

/// A configurable release name parser.
///
/// Parsers share their compiled lexer chain, so cloning is cheap. A parser
/// over a custom vocabulary is built with [`Parser::with_registry`].
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
    scanner: Arc<Scanner>,
}

impl Parser {
    /// Create a parser over the built-in vocabulary.
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            scanner: Arc::clone(&BUILTIN),
        }
    }

    /// Create a parser over a custom vocabulary.
    ///
    /// Fails if an entry's pattern cannot be compiled into the lexers.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use relname_parser::{Parser, ParserConfig, Registry};
    ///
    /// let registry = Registry::from_csv(relname_parser::registry::BUILTIN_TABLE).unwrap();
    /// let parser = Parser::with_registry(ParserConfig::default(), Arc::new(registry)).unwrap();
    /// assert_eq!(parser.parse("Movie.2010.720p-GROUP").year, 2010);
    /// ```
    pub fn with_registry(config: ParserConfig, registry: Arc<Registry>) -> Result<Self> {
        Ok(Self {
            config,
            scanner: Arc::new(Scanner::new(registry)?),
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The vocabulary in use.
    pub fn registry(&self) -> &Arc<Registry> {
        self.scanner.registry()
    }

    /// Parse a release name.
    ///
    /// Parsing never fails: unrecognized input yields a release of
    /// [`ReleaseType::Unknown`] with the text kept as title or unused.
    ///
    /// # Examples
    ///
    /// ```
    /// use relname_parser::Parser;
    ///
    /// let parser = Parser::default();
    /// let release = parser.parse("Show.S01E02.720p.HDTV.x264-GROUP");
    /// assert_eq!((release.series, release.episode), (1, 2));
    /// ```
    pub fn parse(&self, input: &str) -> Release {
        let (tags, pivot) = self.scanner.scan(input);
        builder::build(self.scanner.registry(), &self.config, tags, pivot)
    }

    /// Parse only as far as the release type.
    pub fn parse_type_only(&self, input: &str) -> ReleaseType {
        let config = ParserConfig {
            type_only: true,
            ..self.config.clone()
        };
        let (tags, pivot) = self.scanner.scan(input);
        builder::build(self.scanner.registry(), &config, tags, pivot).release_type
    }

    /// Lex a release name without building. Returns the tags and the
    /// index of the first tag taken from the end of the input.
    pub fn tokenize(&self, input: &str) -> (Vec<Tag>, usize) {
        self.scanner.scan(input)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}
