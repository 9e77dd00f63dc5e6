//! Season and episode markers: `S01E02`, `1x02`, `S01-E01-E02`, `Season 2`,
//! `Vol.3 No.4`, `Ep 12`, `S01D2` and friends.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{compile_all, group_span, LexState, Lexer};
use crate::error::Result;
use crate::model::{Tag, TagType};
use crate::registry::Registry;

const PATTERNS: [&str; 11] = [
    r"^s(?P<s>[0-8]?\d)[\-\_\. ]?(?:e(?P<e>\d{1,5}))?\b",
    r"^s(?P<s>[0-8]?\d)(?P<m>(?:[\-\_\. ]?e\d{1,5}){1,5})\b",
    r"^(?P<S>(?:s[0-8]?\d){2,4})\b",
    r"^(?P<s>[0-8]?\d)x(?P<e>\d{1,3})\b",
    r"^s(?P<s>[0-8]?\d)[\-\_\. ]{1,3}(?P<e>\d{1,5})(?:[\-\_\. ]{1,3}(?P<v>v\d+(?:\.\d+){0,2}))?\b",
    r"^(?:series|season|s)[\-\_\. ]?(?P<s>[0-8]?\d)(?:[\-\_\. ]?(?:episode|ep)(?P<e>\d{1,5}))?\b",
    r"^vol(?:ume)?[\-\_\. ]?(?P<s>\d{1,3})(?:[\-\_\. ]?(?:number|no)[\-\_\. ]?(?P<e>\d{1,5}))\b",
    r"^e(?:p(?:isode)?[\-\_\. ]{1,3})?(?P<e>\d{1,5})(?:[\-\_\. ]{1,3}\d{1,3})?\b",
    r"^(?P<e>\d{1,5})(?P<v>v[\-\_\. ]?\d+(?:\.\d){0,2})\b",
    r"^(?:series|season|s)[\-\_\. ]?(?P<s>[0-8]?\d)[\-\_\. ]?(?P<d>(?:disc|disk|dvd|d)[\-\_\. ]?(?:\d{1,3}))\b",
    r"^s(?P<s>19\d\d)e(?P<e>\d{2,4})\b",
];

static EPISODES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[\-\._ ]?e(\d{1,5})").unwrap_or_else(|e| panic!("invalid episode regex: {}", e))
});

static SEASONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)s(\d?\d)").unwrap_or_else(|e| panic!("invalid season regex: {}", e))
});

static DISC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:disc|disk|dvd|d)").unwrap_or_else(|e| panic!("invalid disc regex: {}", e))
});

#[derive(Debug)]
pub(crate) struct SeriesLexer {
    patterns: Vec<Regex>,
}

impl SeriesLexer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: compile_all("series", &PATTERNS)?,
        })
    }

    fn tags(st: &LexState<'_>, caps: &Captures<'_>) -> Vec<Tag> {
        let full = caps[0].len();
        let text = |name: &str| group_span(caps, name).map(|(a, b)| st.slice(a, b));
        let value = |name: &str| caps.name(name).map_or("", |m| m.as_str());

        let series = value("s");
        let episode = value("e");
        let version = text("v");
        let disc = text("d");
        let mut tags = Vec::new();

        if !series.is_empty() || !episode.is_empty() {
            let cut = version.or(disc).map_or(0, str::len);
            let mut values = vec![st.slice(0, full - cut).to_string(), series.to_string()];
            match text("m") {
                Some(many) => values.extend(EPISODES.captures_iter(many).map(|c| c[1].to_string())),
                None => values.push(episode.to_string()),
            }
            tags.push(Tag::new(TagType::Series, None, values));
        }

        if let Some(v) = version {
            tags.push(Tag::plain(TagType::Version, v));
        }

        if let Some(d) = disc {
            let prefix = DISC_PREFIX.find(d).map_or(0, |m| m.end());
            let kind = d[..prefix].to_uppercase();
            let num = d[prefix..].trim_matches(['-', '_', '.', ' ']);
            if kind == "DVD" {
                tags.push(Tag::new(
                    TagType::Source,
                    Some(TagType::Source),
                    [&d[..prefix], "DVD"],
                ));
                tags.push(Tag::new(TagType::Disc, None, [&d[prefix..], "DVD", num]));
            } else {
                tags.push(Tag::new(TagType::Disc, None, [d, kind.as_str(), num]));
            }
        }

        if let Some((start, _)) = group_span(caps, "S") {
            for m in SEASONS.captures_iter(&caps["S"]) {
                let whole = m.get(0).map_or(0..0, |g| g.range());
                tags.push(Tag::new(
                    TagType::Series,
                    None,
                    [st.slice(start + whole.start, start + whole.end), &m[1], ""],
                ));
            }
        }

        if series.len() == 4 && series.starts_with("19") {
            tags.push(Tag::new(TagType::Date, None, ["", series, "", ""]));
        }
        tags
    }
}

impl Lexer for SeriesLexer {
    fn name(&self) -> &'static str {
        "series"
    }

    fn lex(&self, _: &Registry, st: &mut LexState<'_>) -> bool {
        for re in &self.patterns {
            let Some(caps) = re.captures(st.rest_buf()) else {
                continue;
            };
            let tags = Self::tags(st, &caps);
            if tags.is_empty() {
                continue;
            }
            st.emit(caps[0].len(), tags);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::tests::scan;
    use crate::model::{Tag, TagType};

    fn of(tags: &[Tag], typ: TagType) -> Vec<Tag> {
        tags.iter().filter(|t| t.typ() == typ).cloned().collect()
    }

    #[test]
    fn test_season_episode() {
        let (tags, _) = scan("Show.S01E02.720p");
        let series = of(&tags, TagType::Series);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].series(), (1, 2));
        assert_eq!(series[0].original(), "S01E02");
    }

    #[test]
    fn test_multi_episode() {
        let (tags, _) = scan("Show.S01E01E02E03.720p");
        let series = of(&tags, TagType::Series);
        assert_eq!(series[0].episodes(), vec![1, 2, 3]);
    }

    #[test]
    fn test_cross_format() {
        let (tags, _) = scan("Show.3x07.HDTV");
        assert_eq!(of(&tags, TagType::Series)[0].series(), (3, 7));
    }

    #[test]
    fn test_multi_season() {
        let (tags, _) = scan("Show.S01S02S03.Complete");
        let series = of(&tags, TagType::Series);
        assert_eq!(series.len(), 3);
        assert_eq!(series[2].series(), (3, 0));
        assert_eq!(series[1].original(), "S02");
    }

    #[test]
    fn test_anime_version() {
        let (tags, _) = scan("Show - S02 - 05v2 [720p]");
        assert!(!of(&tags, TagType::Series).is_empty());
        let version = of(&tags, TagType::Version);
        assert_eq!(version[0].value(), "v2");
    }

    #[test]
    fn test_season_disc() {
        let (tags, _) = scan("Show.S02D3.NTSC");
        assert_eq!(of(&tags, TagType::Series)[0].series(), (2, 0));
        let disc = of(&tags, TagType::Disc);
        assert_eq!(disc[0].values()[1], "D");
        assert_eq!(disc[0].values()[2], "3");
    }

    #[test]
    fn test_season_dvd_disc() {
        let (tags, _) = scan("Show.Season.1.DVD2.NTSC");
        assert_eq!(of(&tags, TagType::Source)[0].value(), "DVD");
        assert_eq!(of(&tags, TagType::Disc)[0].values()[1], "DVD");
    }

    #[test]
    fn test_old_season_year() {
        let (tags, _) = scan("Show.S1957E12");
        assert_eq!(of(&tags, TagType::Date)[0].date().0, 1957);
    }
}
