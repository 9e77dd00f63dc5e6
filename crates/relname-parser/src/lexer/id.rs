//! Parenthesised catalogue identifiers, e.g. `(CTCR-14048)`.

use std::sync::LazyLock;

use regex::Regex;

use super::{LexState, Lexer};
use crate::model::{Tag, TagType};
use crate::registry::Registry;

static OPENED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([\._ ]{0,2}$").unwrap_or_else(|e| panic!("invalid id regex: {}", e))
});

static BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z0-9\-\_\. ]{2,24})\)").unwrap_or_else(|e| panic!("invalid id regex: {}", e))
});

#[derive(Debug)]
pub(crate) struct IdLexer;

impl IdLexer {
    pub fn new() -> crate::error::Result<Self> {
        Ok(Self)
    }
}

/// Mostly digits with few separators, or a letter prefix with digits.
fn looks_like_id(s: &str) -> bool {
    let alpha = s.chars().filter(char::is_ascii_uppercase).count();
    let digits = s.chars().filter(char::is_ascii_digit).count();
    let seps = s.chars().filter(|c| matches!(c, '-' | '.' | '_' | ' ')).count();
    (alpha == 0 && digits > 4 && seps < 4)
        || (alpha > 1 && digits > 1 && alpha + digits > 4 && seps < 4)
}

impl Lexer for IdLexer {
    fn name(&self) -> &'static str {
        "id"
    }

    fn lex(&self, _: &Registry, st: &mut LexState<'_>) -> bool {
        if !OPENED.is_match(&st.src[..st.i]) {
            return false;
        }
        let Some(caps) = BODY.captures(st.rest_buf()) else {
            return false;
        };
        let text = &caps[1];
        if !looks_like_id(text) {
            return false;
        }
        let len = caps[0].len();
        let tag = Tag::new(TagType::Id, Some(TagType::Id), [st.slice(0, len), text]);
        st.emit(len, [tag]);
        true
    }
}
