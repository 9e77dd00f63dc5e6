//! Token category enum.

use super::ParseError;

/// Category of a lexed token.
///
/// The vocabulary-backed categories (platform, source, codec, ...) map to a
/// registry category of the same lowercase name; see [`TagType::category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TagType {
    Whitespace,
    Delim,
    Text,
    Platform,
    Arch,
    Source,
    Resolution,
    Collection,
    Date,
    Series,
    Version,
    Disc,
    Codec,
    Hdr,
    Audio,
    Channels,
    Other,
    Cut,
    Edition,
    Language,
    Size,
    Region,
    Container,
    Genre,
    Id,
    Group,
    Meta,
    Ext,
}

impl TagType {
    /// All token categories, in declaration order.
    pub const ALL: [TagType; 28] = [
        TagType::Whitespace,
        TagType::Delim,
        TagType::Text,
        TagType::Platform,
        TagType::Arch,
        TagType::Source,
        TagType::Resolution,
        TagType::Collection,
        TagType::Date,
        TagType::Series,
        TagType::Version,
        TagType::Disc,
        TagType::Codec,
        TagType::Hdr,
        TagType::Audio,
        TagType::Channels,
        TagType::Other,
        TagType::Cut,
        TagType::Edition,
        TagType::Language,
        TagType::Size,
        TagType::Region,
        TagType::Container,
        TagType::Genre,
        TagType::Id,
        TagType::Group,
        TagType::Meta,
        TagType::Ext,
    ];

    /// Lowercase category name, as used in the vocabulary table.
    pub fn category(self) -> &'static str {
        match self {
            TagType::Whitespace => "whitespace",
            TagType::Delim => "delim",
            TagType::Text => "text",
            TagType::Platform => "platform",
            TagType::Arch => "arch",
            TagType::Source => "source",
            TagType::Resolution => "resolution",
            TagType::Collection => "collection",
            TagType::Date => "date",
            TagType::Series => "series",
            TagType::Version => "version",
            TagType::Disc => "disc",
            TagType::Codec => "codec",
            TagType::Hdr => "hdr",
            TagType::Audio => "audio",
            TagType::Channels => "channels",
            TagType::Other => "other",
            TagType::Cut => "cut",
            TagType::Edition => "edition",
            TagType::Language => "language",
            TagType::Size => "size",
            TagType::Region => "region",
            TagType::Container => "container",
            TagType::Genre => "genre",
            TagType::Id => "id",
            TagType::Group => "group",
            TagType::Meta => "meta",
            TagType::Ext => "ext",
        }
    }

    /// Returns true if `self` is one of `types`.
    pub fn is_in(self, types: &[TagType]) -> bool {
        types.contains(&self)
    }
}

impl std::fmt::Display for TagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Debug output is the variant name, e.g. "Whitespace".
        write!(f, "{:?}", self)
    }
}

impl std::str::FromStr for TagType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        TagType::ALL
            .into_iter()
            .find(|t| t.category() == lower)
            .ok_or_else(|| ParseError(format!("invalid tag type: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_type_category_roundtrip() {
        for variant in TagType::ALL {
            let parsed: TagType = variant.category().parse().expect("should parse");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn test_tag_type_display() {
        assert_eq!(TagType::Date.to_string(), "Date");
        assert_eq!(TagType::Hdr.to_string(), "Hdr");
    }

    #[test]
    fn test_tag_type_unknown_category() {
        assert!("subtitle".parse::<TagType>().is_err());
    }
}
