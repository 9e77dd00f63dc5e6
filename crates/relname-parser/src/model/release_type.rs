//! Release type enum.

use super::ParseError;

/// Overall kind of release a name describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ReleaseType {
    #[default]
    Unknown,
    App,
    Audiobook,
    Book,
    Comic,
    Education,
    Episode,
    Game,
    Magazine,
    Movie,
    Music,
    Series,
}

impl ReleaseType {
    /// All release types, in declaration order.
    pub const ALL: [ReleaseType; 12] = [
        ReleaseType::Unknown,
        ReleaseType::App,
        ReleaseType::Audiobook,
        ReleaseType::Book,
        ReleaseType::Comic,
        ReleaseType::Education,
        ReleaseType::Episode,
        ReleaseType::Game,
        ReleaseType::Magazine,
        ReleaseType::Movie,
        ReleaseType::Music,
        ReleaseType::Series,
    ];

    /// Lowercase name used in vocabulary data and output.
    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseType::Unknown => "unknown",
            ReleaseType::App => "app",
            ReleaseType::Audiobook => "audiobook",
            ReleaseType::Book => "book",
            ReleaseType::Comic => "comic",
            ReleaseType::Education => "education",
            ReleaseType::Episode => "episode",
            ReleaseType::Game => "game",
            ReleaseType::Magazine => "magazine",
            ReleaseType::Movie => "movie",
            ReleaseType::Music => "music",
            ReleaseType::Series => "series",
        }
    }

    /// Returns true if `self` is one of `types`.
    pub fn is_in(self, types: &[ReleaseType]) -> bool {
        types.contains(&self)
    }
}

impl std::fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReleaseType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ReleaseType::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| ParseError(format!("invalid release type: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_type_display_fromstr_roundtrip() {
        for variant in ReleaseType::ALL {
            let s = variant.to_string();
            let parsed: ReleaseType = s.parse().expect("should parse");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn test_release_type_case_insensitive() {
        assert_eq!("MOVIE".parse::<ReleaseType>().unwrap(), ReleaseType::Movie);
        assert_eq!("AudioBook".parse::<ReleaseType>().unwrap(), ReleaseType::Audiobook);
        assert!("film".parse::<ReleaseType>().is_err());
        assert!("".parse::<ReleaseType>().is_err());
    }

    #[test]
    fn test_release_type_default() {
        assert_eq!(ReleaseType::default(), ReleaseType::Unknown);
    }
}
