//! Vocabulary lexers: one alternation per registry category.

use regex::Regex;

use super::{alternation, compile, LexState, Lexer};
use crate::error::Result;
use crate::model::{Tag, TagType};
use crate::registry::Registry;

/// How a vocabulary match must end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    /// At a word boundary of the blanked input.
    Word,
    /// At a word boundary or by swallowing one delimiter of the source.
    Delim,
}

#[derive(Debug)]
pub(crate) struct VocabLexer {
    typ: TagType,
    boundary: Boundary,
    re: Regex,
}

impl VocabLexer {
    pub fn new(
        registry: &Registry,
        typ: TagType,
        boundary: Boundary,
        ignore_case: bool,
    ) -> Result<Self> {
        let flags = if ignore_case { "(?i)" } else { "" };
        let alts = alternation(registry, typ);
        let pattern = match boundary {
            Boundary::Word => format!(r"{}^({})\b", flags, alts),
            Boundary::Delim => format!(r"{}^({})(?:\b|[\-\_\. ])", flags, alts),
        };
        Ok(Self {
            typ,
            boundary,
            re: compile(typ.category(), &pattern)?,
        })
    }
}

impl Lexer for VocabLexer {
    fn name(&self) -> &'static str {
        self.typ.category()
    }

    fn lex(&self, _: &Registry, st: &mut LexState<'_>) -> bool {
        let haystack = match self.boundary {
            Boundary::Word => st.rest_buf(),
            Boundary::Delim => st.rest(),
        };
        let Some(caps) = self.re.captures(haystack) else {
            return false;
        };
        let (full, value) = (caps[0].len(), caps[1].len());
        if full == 0 || value == 0 {
            return false;
        }

        let lookup = Some(self.typ);
        match self.boundary {
            Boundary::Word => {
                let tag = Tag::new(self.typ, lookup, [st.slice(0, full), &caps[1]]);
                st.emit(full, [tag]);
            }
            Boundary::Delim if full > value => {
                let (v, rest) = (st.slice(0, value), st.slice(value, full));
                st.emit(
                    full,
                    [
                        Tag::new(self.typ, lookup, [v, v]),
                        Tag::plain(TagType::Delim, rest),
                    ],
                );
            }
            Boundary::Delim => {
                let v = st.slice(0, full);
                st.emit(full, [Tag::new(self.typ, lookup, [v, v])]);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::tests::scan;
    use crate::model::{Tag, TagType};

    fn find(tags: &[Tag], typ: TagType) -> Option<&Tag> {
        tags.iter().find(|t| t.typ() == typ)
    }

    #[test]
    fn test_word_boundary_match() {
        let (tags, _) = scan("Movie.2010.1080p.BluRay.x264-GRPNAME");
        let source = find(&tags, TagType::Source).unwrap();
        assert_eq!(source.original(), "BluRay");
        let res = find(&tags, TagType::Resolution).unwrap();
        assert_eq!(res.original(), "1080p");
    }

    #[test]
    fn test_partial_word_not_matched() {
        let (tags, _) = scan("Bluraylike.Movie");
        assert!(find(&tags, TagType::Source).is_none());
    }

    #[test]
    fn test_codec_splits_trailing_delim() {
        let (tags, _) = scan("Movie.2010.720p.H.264.AAC-GRPNAME");
        let codec = find(&tags, TagType::Codec).unwrap();
        assert_eq!(codec.original(), "H.264");
    }

    #[test]
    fn test_underscore_separated() {
        let (tags, _) = scan("Movie_2010_720p_BluRay");
        assert_eq!(find(&tags, TagType::Source).unwrap().original(), "BluRay");
    }
}
