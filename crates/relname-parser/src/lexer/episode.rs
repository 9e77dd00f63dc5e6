//! Bare episode numbers after a dash, as in `Show - 05 [720p]`.

use std::sync::LazyLock;

use regex::Regex;

use super::{LexState, Lexer};
use crate::model::{Tag, TagType};
use crate::registry::Registry;

static DASHED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-[\-\._ ]{1,3}$").unwrap_or_else(|e| panic!("invalid episode regex: {}", e))
});

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,4})(\b|[\._ ]?[\-\[\]\(\)\{\}])")
        .unwrap_or_else(|e| panic!("invalid episode regex: {}", e))
});

#[derive(Debug)]
pub(crate) struct EpisodeLexer;

impl EpisodeLexer {
    pub fn new() -> crate::error::Result<Self> {
        Ok(Self)
    }
}

impl Lexer for EpisodeLexer {
    fn name(&self) -> &'static str {
        "episode"
    }

    fn lex(&self, _: &Registry, st: &mut LexState<'_>) -> bool {
        if !DASHED.is_match(&st.src[..st.i]) {
            return false;
        }
        let Some(caps) = NUMBER.captures(st.rest()) else {
            return false;
        };
        let (num, delim) = (&caps[1], &caps[2]);
        if st.src[st.i + num.len()..].starts_with(',') {
            return false;
        }
        let mut tags = vec![Tag::new(TagType::Series, None, [num, "", num, ""])];
        if !delim.is_empty() {
            tags.push(Tag::plain(TagType::Delim, delim));
        }
        st.emit(caps[0].len(), tags);
        true
    }
}
