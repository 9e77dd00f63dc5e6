//! File extension at the end of the input.

use regex::Regex;

use super::{alternation, compile, LexState, Lexer};
use crate::error::Result;
use crate::model::{Tag, TagType};
use crate::registry::Registry;

#[derive(Debug)]
pub(crate) struct ExtLexer {
    re: Regex,
}

impl ExtLexer {
    pub fn new(registry: &Registry) -> Result<Self> {
        let pattern = format!(r"(?i)\.({})$", alternation(registry, TagType::Ext));
        Ok(Self {
            re: compile("ext", &pattern)?,
        })
    }
}

impl Lexer for ExtLexer {
    fn name(&self) -> &'static str {
        "ext"
    }

    fn lex(&self, _: &Registry, st: &mut LexState<'_>) -> bool {
        let Some(caps) = self.re.captures(st.rest()) else {
            return false;
        };
        let (full, ext) = (&caps[0], &caps[1]);
        if ext.is_empty() {
            return false;
        }
        st.tail
            .push_front(Tag::new(TagType::Ext, Some(TagType::Ext), [full, ext]));
        st.n -= full.len();
        true
    }
}
