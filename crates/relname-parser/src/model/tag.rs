//! Lexed tokens.

use std::borrow::Cow;
use std::fmt;

use super::{ReleaseType, TagType};
use crate::registry::{Registry, TagInfo};

/// A classified slice of the input.
///
/// `values()[0]` is always the exact text consumed from the input; the
/// remaining values are captures whose meaning depends on the type. A tag
/// remembers the type it had before its last reclassification so the
/// builder can revert it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    typ: TagType,
    lookup: Option<TagType>,
    prev: TagType,
    prev_lookup: Option<TagType>,
    v: Vec<String>,
}

impl Tag {
    /// Creates a tag. `lookup` names the registry category used to resolve
    /// the tag's canonical form. Fewer than two values are padded with
    /// empty strings.
    pub fn new<I, S>(typ: TagType, lookup: Option<TagType>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut v: Vec<String> = values.into_iter().map(Into::into).collect();
        while v.len() < 2 {
            v.push(String::new());
        }
        Self {
            typ,
            lookup,
            prev: typ,
            prev_lookup: lookup,
            v,
        }
    }

    /// A tag whose single capture is its own text.
    pub fn plain(typ: TagType, s: &str) -> Self {
        Self::new(typ, None, [s, s])
    }

    /// Current type.
    pub fn typ(&self) -> TagType {
        self.typ
    }

    /// Registry category used for lookup, if any.
    pub fn lookup(&self) -> Option<TagType> {
        self.lookup
    }

    /// Type before the last reclassification.
    pub fn prev_typ(&self) -> TagType {
        self.prev
    }

    /// Returns true if the current type is one of `types`.
    pub fn is(&self, types: &[TagType]) -> bool {
        types.contains(&self.typ)
    }

    /// Returns true if the previous type is one of `types`.
    pub fn was(&self, types: &[TagType]) -> bool {
        types.contains(&self.prev)
    }

    /// Reclassifies the tag, saving the current classification for
    /// [`Tag::revert`].
    pub fn reclassify(&mut self, typ: TagType, lookup: Option<TagType>) {
        self.prev = self.typ;
        self.prev_lookup = self.lookup;
        self.typ = typ;
        self.lookup = lookup;
    }

    /// Demotes the tag to free text.
    pub fn demote(&mut self) {
        self.reclassify(TagType::Text, None);
    }

    /// Restores the saved classification.
    pub fn revert(&mut self) {
        self.typ = self.prev;
        self.lookup = self.prev_lookup;
    }

    /// All values; the first is the original text.
    pub fn values(&self) -> &[String] {
        &self.v
    }

    /// Exact input text this tag consumed.
    pub fn original(&self) -> &str {
        &self.v[0]
    }

    /// First capture.
    pub fn value(&self) -> &str {
        &self.v[1]
    }

    /// Delimiter text of a delimiter tag.
    pub fn delim(&self) -> &str {
        &self.v[1]
    }

    /// Text used when the tag is absorbed into a title.
    pub fn text(&self) -> Cow<'_, str> {
        match self.prev {
            TagType::Date | TagType::Series => Cow::Borrowed(&self.v[0]),
            TagType::Channels => Cow::Owned(format_channels(&self.v[1])),
            _ => Cow::Borrowed(&self.v[1]),
        }
    }

    /// [`Tag::text`] with periods turned into spaces.
    pub fn title_text(&self) -> String {
        let s = self.text();
        if self.prev == TagType::Channels {
            return s.into_owned();
        }
        s.replace('.', " ")
    }

    /// `(year, month, day)` of a date tag; missing parts are 0.
    pub fn date(&self) -> (u32, u32, u32) {
        (self.int(1), self.int(2), self.int(3))
    }

    /// `(season, first episode)` of a series tag; missing parts are 0.
    pub fn series(&self) -> (u32, u32) {
        (self.int(1), self.int(2))
    }

    /// All non-empty episode numbers of a series tag.
    pub fn episodes(&self) -> Vec<u32> {
        self.v
            .iter()
            .skip(2)
            .filter(|s| !s.is_empty())
            .map(|s| parse_int(s))
            .collect()
    }

    /// Whether this is a bare episode number with no season, such as the
    /// `05` in `Artist - 05 - Track`.
    pub fn single_ep(&self) -> bool {
        if self.typ != TagType::Series {
            return false;
        }
        let (s, e) = self.series();
        s == 0 && e != 0 && self.v[1].is_empty() && self.v.get(2) == Some(&self.v[0])
    }

    /// `(key, value)` of a meta tag.
    pub fn meta(&self) -> (&str, &str) {
        (&self.v[1], self.v.get(2).map(String::as_str).unwrap_or(""))
    }

    /// Canonical string form of the tag.
    pub fn normalize(&self, registry: &Registry) -> String {
        match self.typ {
            TagType::Whitespace | TagType::Delim | TagType::Version | TagType::Group => {
                self.v[1].clone()
            }
            TagType::Text => self.text().into_owned(),
            TagType::Platform
            | TagType::Arch
            | TagType::Source
            | TagType::Resolution
            | TagType::Collection
            | TagType::Codec
            | TagType::Hdr
            | TagType::Audio
            | TagType::Cut
            | TagType::Edition
            | TagType::Language
            | TagType::Region
            | TagType::Container
            | TagType::Genre
            | TagType::Id => self.canonical(registry),
            TagType::Date => {
                let (year, month, day) = self.date();
                if month != 0 && day != 0 {
                    format!("{}-{:02}-{:02}", year, month, day)
                } else {
                    year.to_string()
                }
            }
            TagType::Series => {
                let (series, episode) = self.series();
                if episode != 0 {
                    format!("S{:02}E{:02}", series, episode)
                } else {
                    format!("S{:02}", series)
                }
            }
            TagType::Disc => {
                let n = self.int(2);
                match self.v[1].as_str() {
                    t @ ("CD" | "DVD") => format!("{}{}", t, n),
                    "S" => format!("{}DiSCS", n),
                    "X" => format!("{}x", n),
                    _ => format!("D{:02}", n),
                }
            }
            TagType::Channels => format_channels(&self.canonical(registry)),
            TagType::Other => {
                let s = self.canonical(registry);
                let upper = s.to_uppercase();
                if upper == "19XX" || upper == "20XX" {
                    upper
                } else {
                    s
                }
            }
            TagType::Size => self.canonical(registry).to_uppercase().replacen('I', "i", 1),
            TagType::Meta => {
                let (k, s) = self.meta();
                match k {
                    "site" | "sum" => format!("[{}]", s),
                    "pass" => format!("{{{{{}}}}}", s),
                    "req" => "[REQ]".to_string(),
                    _ => format!("[[{}:{}]]", k, s),
                }
            }
            TagType::Ext => self.v[1].to_lowercase(),
        }
    }

    /// Registry entry matching the normalized form of the tag.
    pub fn info<'r>(&self, registry: &'r Registry) -> Option<&'r TagInfo> {
        let category = self.lookup?;
        registry.find(category, &self.normalize(registry))
    }

    /// Release type of the matching registry entry.
    pub fn info_type(&self, registry: &Registry) -> ReleaseType {
        self.info(registry)
            .map(TagInfo::release_type)
            .unwrap_or_default()
    }

    /// Exclusivity flag of the matching registry entry.
    pub fn info_excl(&self, registry: &Registry) -> bool {
        self.info(registry).is_some_and(TagInfo::is_exclusive)
    }

    /// Display title of the matching registry entry, or empty.
    pub fn info_title(&self, registry: &Registry) -> String {
        let value = self.normalize(registry);
        self.lookup
            .and_then(|category| registry.find(category, &value))
            .map(|info| info.display_title(&self.v[1]))
            .unwrap_or_default()
    }

    fn canonical(&self, registry: &Registry) -> String {
        let value = &self.v[1];
        self.lookup
            .and_then(|category| registry.find(category, value))
            .map(|info| info.canonical(value))
            .unwrap_or_else(|| value.clone())
    }

    fn int(&self, idx: usize) -> u32 {
        self.v.get(idx).map(|s| parse_int(s)).unwrap_or(0)
    }
}

impl fmt::Display for Tag {
    /// Formats as `Type:["capture", ...]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.typ, &self.v[1..])
    }
}

/// Leading decimal digits of `s` as a number, or 0.
pub(crate) fn parse_int(s: &str) -> u32 {
    let s = s.trim_start();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().unwrap_or(0)
}

/// Channel layout digits as `d.rest`, e.g. `51` to `5.1`.
fn format_channels(s: &str) -> String {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) => format!("{}.{}", first, chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> std::sync::Arc<Registry> {
        Registry::builtin()
    }

    #[test]
    fn test_new_pads_values() {
        let tag = Tag::new(TagType::Text, None, ["x"]);
        assert_eq!(tag.values(), &["x".to_string(), String::new()]);
    }

    #[test]
    fn test_reclassify_and_revert() {
        let mut tag = Tag::new(TagType::Platform, Some(TagType::Platform), ["PS4", "PS4"]);
        tag.demote();
        assert!(tag.is(&[TagType::Text]));
        assert!(tag.was(&[TagType::Platform]));
        assert_eq!(tag.lookup(), None);
        tag.revert();
        assert!(tag.is(&[TagType::Platform]));
        assert_eq!(tag.lookup(), Some(TagType::Platform));
    }

    #[test]
    fn test_text_of_demoted_date_is_original() {
        let mut tag = Tag::new(TagType::Date, None, ["1999", "1999", "", ""]);
        tag.demote();
        assert_eq!(tag.text(), "1999");
    }

    #[test]
    fn test_text_of_demoted_channels() {
        let mut tag = Tag::new(TagType::Channels, Some(TagType::Channels), ["5.1", "5.1"]);
        tag.demote();
        assert_eq!(tag.text(), "5.1");
        assert_eq!(tag.title_text(), "5.1");
    }

    #[test]
    fn test_normalize_date_and_series() {
        let reg = registry();
        let date = Tag::new(TagType::Date, None, ["2009.01.02", "2009", "01", "02"]);
        assert_eq!(date.normalize(&reg), "2009-01-02");
        let year = Tag::new(TagType::Date, None, ["2009", "2009", "", ""]);
        assert_eq!(year.normalize(&reg), "2009");
        let series = Tag::new(TagType::Series, None, ["S01E02", "01", "02"]);
        assert_eq!(series.normalize(&reg), "S01E02");
        let season = Tag::new(TagType::Series, None, ["S03", "03", ""]);
        assert_eq!(season.normalize(&reg), "S03");
    }

    #[test]
    fn test_normalize_disc() {
        let reg = registry();
        let disc = |v: [&str; 3]| Tag::new(TagType::Disc, None, v).normalize(&reg);
        assert_eq!(disc(["CD1", "CD", "1"]), "CD1");
        assert_eq!(disc(["12DiSCS", "S", "12"]), "12DiSCS");
        assert_eq!(disc(["2x", "X", "2"]), "2x");
        assert_eq!(disc(["D3", "D", "3"]), "D03");
    }

    #[test]
    fn test_normalize_vocabulary() {
        let reg = registry();
        let tag = Tag::new(TagType::Source, Some(TagType::Source), ["bluray", "bluray"]);
        assert_eq!(tag.normalize(&reg), "BluRay");
        assert_eq!(tag.info_type(&reg), ReleaseType::Movie);
        let res = Tag::new(TagType::Resolution, Some(TagType::Resolution), ["1440p", "1440p"]);
        assert_eq!(res.normalize(&reg), "1440p");
    }

    #[test]
    fn test_normalize_channels_and_meta() {
        let reg = registry();
        let ch = Tag::new(TagType::Channels, Some(TagType::Channels), ["51", "51"]);
        assert_eq!(ch.normalize(&reg), "5.1");
        let meta = |k: &str, v: &str| Tag::new(TagType::Meta, None, ["x", k, v]).normalize(&reg);
        assert_eq!(meta("site", "abc"), "[abc]");
        assert_eq!(meta("pass", "pw"), "{{pw}}");
        assert_eq!(meta("req", "REQ"), "[REQ]");
        assert_eq!(meta("imdb", "tt01"), "[[imdb:tt01]]");
    }

    #[test]
    fn test_single_ep() {
        let ep = Tag::new(TagType::Series, None, ["05", "", "05", ""]);
        assert!(ep.single_ep());
        let full = Tag::new(TagType::Series, None, ["S01E05", "01", "05"]);
        assert!(!full.single_ep());
    }

    #[test]
    fn test_episodes() {
        let tag = Tag::new(TagType::Series, None, ["S01E01E02", "01", "01", "02"]);
        assert_eq!(tag.episodes(), vec![1, 2]);
    }

    #[test]
    fn test_display() {
        let tag = Tag::new(TagType::Date, None, ["2009", "2009", "", ""]);
        assert_eq!(tag.to_string(), r#"Date:["2009", "", ""]"#);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("02"), 2);
        assert_eq!(parse_int("12abc"), 12);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("x1"), 0);
    }
}
