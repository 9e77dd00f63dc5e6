//! Parser configuration.

/// Configuration for the parser.
///
/// Use the builder pattern to create a configuration:
///
/// ```
/// use relname_parser::config::ParserConfig;
///
/// let config = ParserConfig::builder()
///     .type_only(true)
///     .build();
/// assert!(config.type_only);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserConfig {
    /// Stop once the release type is settled, skipping title extraction.
    /// Default: false
    pub type_only: bool,

    /// Split a movie or episode title on ` AKA ` into title and alternate.
    /// Default: true
    pub expand_aka: bool,

    /// Promote the last unclaimed text token to group or checksum.
    /// Default: true
    pub extract_unused: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            type_only: false,
            expand_aka: true,
            extract_unused: true,
        }
    }
}

impl ParserConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder.
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }
}

/// Builder for `ParserConfig`.
#[derive(Debug, Clone, Default)]
pub struct ParserConfigBuilder {
    type_only: Option<bool>,
    expand_aka: Option<bool>,
    extract_unused: Option<bool>,
}

impl ParserConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to stop after release type inference.
    ///
    /// Default: false
    pub fn type_only(mut self, enabled: bool) -> Self {
        self.type_only = Some(enabled);
        self
    }

    /// Set whether to split ` AKA ` titles.
    ///
    /// Default: true
    pub fn expand_aka(mut self, enabled: bool) -> Self {
        self.expand_aka = Some(enabled);
        self
    }

    /// Set whether leftover text may become the group or checksum.
    ///
    /// Default: true
    pub fn extract_unused(mut self, enabled: bool) -> Self {
        self.extract_unused = Some(enabled);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ParserConfig {
        ParserConfig {
            type_only: self.type_only.unwrap_or(false),
            expand_aka: self.expand_aka.unwrap_or(true),
            extract_unused: self.extract_unused.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert!(!config.type_only);
        assert!(config.expand_aka);
        assert!(config.extract_unused);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ParserConfig::builder()
            .type_only(true)
            .expand_aka(false)
            .extract_unused(false)
            .build();

        assert!(config.type_only);
        assert!(!config.expand_aka);
        assert!(!config.extract_unused);
    }

    #[test]
    fn test_builder_partial() {
        let config = ParserConfig::builder().expand_aka(false).build();

        assert!(!config.type_only); // default
        assert!(!config.expand_aka);
        assert!(config.extract_unused); // default
    }
}
