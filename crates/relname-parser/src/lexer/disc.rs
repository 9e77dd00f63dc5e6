//! Disc counts and numbers: `CD2`, `Disc 1`, `2xDVD9`, `3CD`, `2DiSCS`, and
//! combined media and year markers such as `2CD2004` or `WEB2019`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{compile_all, group_span, LexState, Lexer};
use crate::error::Result;
use crate::model::{Tag, TagType};
use crate::registry::Registry;

const DISC_PATTERNS: [&str; 10] = [
    r"^(?P<t>d)(?:is[ck][\-\_\. ])?(?P<c>\d{1,3})\b",
    r"^(?P<c>\d{1,3})[\-\_\. ]?di(?P<t>s)[ck]s?\b",
    r"^(?P<t>cd)[\-\_\. ]?(?P<c>\d{1,2})\b",
    r"^(?P<t>dvd)[\-\_\. ]?(?P<c>[1-46-8]|[12]\d)\b",
    r"^(?P<c>\d{1,2})(?P<t>x(?:dvd9))\b",
    r"^(?P<c>[2-9])(?P<z>dvd9)\b",
    r"^(?P<c>\d{1,2})(?P<t>x(?:cd|ep|lp|dvda|dvd|vls|vinyl)s?)\b",
    r"^(?P<c>\d{1,2})(?P<x>(?:cd|ep|lp|dvda|dvd|vls|vinyl)s?)\b",
    r"^(?:(?P<x>cd)s)(?P<c>\d{1,2})\b",
    r"^(?P<c>[2-9])(?P<x>cds)\b",
];

const SOURCE_YEAR_PATTERNS: [&str; 2] = [
    r"^(?P<d>[2-9])?(?P<s>cd|ep|lp|dvd|vls|vinyl)(?P<y>(?:19|20)\d\d)\b",
    r"^(?P<s>web)(?P<y>20\d\d)\b",
];

static KIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:dvd|cd|d|s|x)").unwrap_or_else(|e| panic!("invalid disc regex: {}", e))
});

#[derive(Debug)]
pub(crate) struct DiscLexer {
    patterns: Vec<Regex>,
}

impl DiscLexer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: compile_all("disc", &DISC_PATTERNS)?,
        })
    }

    fn tags(st: &LexState<'_>, caps: &Captures<'_>) -> Option<Vec<Tag>> {
        let (c_start, c_end) = group_span(caps, "c")?;
        let s = st.slice(0, caps[0].len());
        let count = &s[c_start..c_end];
        let source = Some(TagType::Source);

        if let Some((z, _)) = group_span(caps, "z") {
            let size = s[z..].to_uppercase();
            return Some(vec![
                Tag::new(TagType::Disc, None, [&s[..z], "X", count]),
                Tag::new(TagType::Size, Some(TagType::Size), [&s[z..], size.as_str()]),
            ]);
        }

        if let Some((t, _)) = group_span(caps, "t") {
            let t_text = &s[t..];
            let kind_len = KIND.find(t_text).map_or(0, |m| m.end());
            let kind = t_text[..kind_len].to_uppercase();
            return Some(match kind.as_str() {
                "DVD" | "CD" => vec![
                    Tag::new(TagType::Source, source, [&s[..kind_len], kind.as_str()]),
                    Tag::new(TagType::Disc, None, [&s[kind_len..], kind.as_str(), count]),
                ],
                "X" => {
                    let rest = &s[t + 1..];
                    let media = if rest.eq_ignore_ascii_case("DVD9") {
                        Tag::new(TagType::Size, Some(TagType::Size), [rest, "DVD9"])
                    } else {
                        Tag::new(TagType::Source, source, [rest, rest])
                    };
                    vec![Tag::new(TagType::Disc, None, [&s[..t + 1], "X", count]), media]
                }
                _ => vec![Tag::new(TagType::Disc, None, [s, kind.as_str(), count])],
            });
        }

        let (x_start, x_end) = group_span(caps, "x")?;
        let media = s[x_start..x_end].to_uppercase();
        Some(if x_start == 0 {
            vec![
                Tag::new(TagType::Source, source, [&s[..x_end], media.as_str()]),
                Tag::new(TagType::Disc, None, [&s[x_end..], "X", count]),
            ]
        } else {
            vec![
                Tag::new(TagType::Disc, None, [&s[..x_start], "X", count]),
                Tag::new(TagType::Source, source, [&s[x_start..], media.as_str()]),
            ]
        })
    }
}

impl Lexer for DiscLexer {
    fn name(&self) -> &'static str {
        "disc"
    }

    fn lex(&self, _: &Registry, st: &mut LexState<'_>) -> bool {
        for re in &self.patterns {
            let Some(caps) = re.captures(st.rest_buf()) else {
                continue;
            };
            if let Some(tags) = Self::tags(st, &caps) {
                st.emit(caps[0].len(), tags);
                return true;
            }
        }
        false
    }
}

#[derive(Debug)]
pub(crate) struct DiscSourceYearLexer {
    patterns: Vec<Regex>,
}

impl DiscSourceYearLexer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: compile_all("disc source year", &SOURCE_YEAR_PATTERNS)?,
        })
    }
}

impl Lexer for DiscSourceYearLexer {
    fn name(&self) -> &'static str {
        "disc source year"
    }

    fn lex(&self, _: &Registry, st: &mut LexState<'_>) -> bool {
        for re in &self.patterns {
            let Some(caps) = re.captures(st.rest_buf()) else {
                continue;
            };
            let text = |name: &str| group_span(&caps, name).map(|(a, b)| st.slice(a, b));
            let mut tags = Vec::new();
            if let Some(d) = text("d") {
                tags.push(Tag::new(TagType::Disc, None, [d, "X", d]));
            }
            if let Some(s) = text("s") {
                tags.push(Tag::new(TagType::Source, Some(TagType::Source), [s, s]));
            }
            if let Some(y) = text("y") {
                tags.push(Tag::new(TagType::Date, None, [y, y, "", ""]));
            }
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
    fn test_cd_number() {
        let (tags, _) = scan("Artist-Album-CD2-2004-GRPNAME");
        let disc = of(&tags, TagType::Disc);
        assert_eq!(disc[0].values()[1], "CD");
        assert_eq!(disc[0].values()[2], "2");
        assert_eq!(of(&tags, TagType::Source)[0].original(), "CD");
    }

    #[test]
    fn test_disc_word() {
        let (tags, _) = scan("Some.Game.Disc.2.PAL");
        let disc = of(&tags, TagType::Disc);
        assert_eq!(disc[0].original(), "Disc.2");
        assert_eq!(disc[0].values()[1], "D");
    }

    #[test]
    fn test_count_times_media() {
        let (tags, _) = scan("Artist-Album-2xVinyl-2004-GRPNAME");
        let disc = of(&tags, TagType::Disc);
        assert_eq!(disc[0].original(), "2x");
        assert_eq!(disc[0].values()[1], "X");
        assert_eq!(of(&tags, TagType::Source)[0].original(), "Vinyl");
    }

    #[test]
    fn test_count_media() {
        let (tags, _) = scan("Artist-Album-3CD-2004-GRPNAME");
        assert_eq!(of(&tags, TagType::Disc)[0].original(), "3");
        let source = of(&tags, TagType::Source);
        assert_eq!(source[0].original(), "CD");
        assert_eq!(source[0].value(), "CD");
    }

    #[test]
    fn test_dual_layer_size() {
        let (tags, _) = scan("Movie.2xDVD9.PAL");
        assert_eq!(of(&tags, TagType::Size)[0].value(), "DVD9");
    }

    #[test]
    fn test_source_year() {
        let (tags, _) = scan("Artist-Album-2CD2004-GRPNAME");
        assert_eq!(of(&tags, TagType::Disc)[0].original(), "2");
        assert_eq!(of(&tags, TagType::Source)[0].original(), "CD");
        assert_eq!(of(&tags, TagType::Date)[0].date().0, 2004);
    }

    #[test]
    fn test_web_year() {
        let (tags, _) = scan("Artist-Album-WEB2019-GRPNAME");
        assert_eq!(of(&tags, TagType::Source)[0].original(), "WEB");
        assert_eq!(of(&tags, TagType::Date)[0].date().0, 2019);
    }
}
