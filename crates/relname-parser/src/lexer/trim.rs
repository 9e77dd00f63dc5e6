//! Leading and trailing whitespace.

use regex::Regex;

use super::{compile, LexState, Lexer};
use crate::error::Result;
use crate::model::{Tag, TagType};
use crate::registry::Registry;

const PREFIX: &str = r"^[\t\n\f\r ⭐\x{FE0F}]+";
const SUFFIX: &str = r"[\t\n\f\r ⭐\x{FE0F}]+$";

#[derive(Debug)]
pub(crate) struct TrimLexer {
    prefix: Regex,
    suffix: Regex,
}

impl TrimLexer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            prefix: compile("trim", PREFIX)?,
            suffix: compile("trim", SUFFIX)?,
        })
    }
}

impl Lexer for TrimLexer {
    fn name(&self) -> &'static str {
        "trim"
    }

    fn lex(&self, _: &Registry, st: &mut LexState<'_>) -> bool {
        if let Some(m) = self.prefix.find(st.rest()) {
            st.emit(m.end(), [Tag::plain(TagType::Whitespace, m.as_str())]);
        }
        if let Some(m) = self.suffix.find(st.rest()) {
            st.tail
                .push_front(Tag::plain(TagType::Whitespace, m.as_str()));
            st.n -= m.len();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::tests::scan;
    use crate::model::TagType;

    #[test]
    fn test_trim_both_ends() {
        let (tags, pivot) = scan(" \tName ⭐");
        assert_eq!(tags[0].typ(), TagType::Whitespace);
        assert_eq!(tags[0].original(), " \t");
        assert_eq!(tags[1].original(), "Name");
        assert_eq!(tags[2].typ(), TagType::Whitespace);
        assert_eq!(tags[2].original(), " ⭐");
        assert_eq!(pivot, 2);
    }

    #[test]
    fn test_trim_all_space() {
        let (tags, pivot) = scan("   ");
        assert_eq!(tags.len(), 1);
        assert_eq!(pivot, 1);
    }
}
