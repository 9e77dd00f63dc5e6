//! Genres, either parenthesised (`(Comedy)`) or as the uppercase short
//! forms listed in the vocabulary's other column (`DOCU`, `ANiME`).

use regex::Regex;

use super::{alternation, compile, LexState, Lexer};
use crate::error::Result;
use crate::model::{Tag, TagType};
use crate::registry::Registry;

#[derive(Debug)]
pub(crate) struct GenreLexer {
    bracketed: Regex,
    opened: Regex,
    bare: Option<Regex>,
}

impl GenreLexer {
    pub fn new(registry: &Registry) -> Result<Self> {
        let alts = alternation(registry, TagType::Genre);
        let others: Vec<&str> = registry
            .infos(TagType::Genre)
            .iter()
            .map(|info| info.other())
            .filter(|other| !other.is_empty())
            .collect();
        let bare = if others.is_empty() {
            None
        } else {
            Some(compile("genre", &format!(r"(?i)^({})\b", others.join("|")))?)
        };
        Ok(Self {
            bracketed: compile("genre", &format!(r"(?i)^\(?({})\s*\)", alts))?,
            opened: compile("genre", &format!(r"(?i)\(\s*\(?({})\s*\)$", alts))?,
            bare,
        })
    }
}

impl Lexer for GenreLexer {
    fn name(&self) -> &'static str {
        "genre"
    }

    fn lex(&self, _: &Registry, st: &mut LexState<'_>) -> bool {
        let genre = Some(TagType::Genre);
        if let Some(caps) = self.bracketed.captures(st.rest()) {
            let len = caps[0].len();
            if self.opened.is_match(&st.src[..st.i + len]) {
                let tag = Tag::new(TagType::Genre, genre, [&caps[0], &caps[1]]);
                st.emit(len, [tag]);
                return true;
            }
        }

        let Some(caps) = self.bare.as_ref().and_then(|re| re.captures(st.rest_buf())) else {
            return false;
        };
        let len = caps[0].len();
        if len == 0 {
            return false;
        }
        let tag = Tag::new(TagType::Genre, genre, [st.slice(0, len), &caps[1]]);
        st.emit(len, [tag]);
        true
    }
}
