//! Release group at the end of the input.
//!
//! Known group names (which may themselves contain delimiters) are matched
//! from the vocabulary. Otherwise the text after the last `-` that follows
//! the last year is taken, provided it looks like a name.

use std::sync::LazyLock;

use regex::Regex;

use super::{alternation, compile, LexState, Lexer};
use crate::error::Result;
use crate::model::{Tag, TagType};
use crate::registry::Registry;

static YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:19|20)\d{2}\b").unwrap_or_else(|e| panic!("invalid year regex: {}", e))
});

static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_ ]{2,10}$").unwrap_or_else(|e| panic!("invalid name regex: {}", e))
});

const INVALID: &[char] = &[' ', '_', '.', '(', ')', '[', ']', '{', '}', '+'];

#[derive(Debug)]
pub(crate) struct GroupLexer {
    known: Regex,
    special: Option<Regex>,
}

impl GroupLexer {
    pub fn new(registry: &Registry) -> Result<Self> {
        let known = format!(
            r"(?i)[\-\_\. ](({})$)",
            alternation(registry, TagType::Group)
        );
        let others: Vec<&str> = registry
            .infos(TagType::Other)
            .iter()
            .map(|info| info.other())
            .filter(|other| !other.is_empty())
            .collect();
        let special = if others.is_empty() {
            None
        } else {
            Some(compile("group", &format!("(?i)_({})$", others.join("|")))?)
        };
        Ok(Self {
            known: compile("group", &known)?,
            special,
        })
    }
}

impl Lexer for GroupLexer {
    fn name(&self) -> &'static str {
        "group"
    }

    fn lex(&self, registry: &Registry, st: &mut LexState<'_>) -> bool {
        if let Some(caps) = self.special.as_ref().and_then(|re| re.captures(st.rest())) {
            let (full, other) = (&caps[0], &caps[1]);
            st.tail
                .push_front(Tag::new(TagType::Other, Some(TagType::Other), [full, other]));
            st.n -= full.len();
        }

        if let Some(caps) = self.known.captures(st.rest()).filter(|c| !c[1].is_empty()) {
            let (full, group) = (&caps[0], &caps[1]);
            st.tail
                .push_front(Tag::new(TagType::Group, Some(TagType::Group), [full, group]));
            st.n -= full.len();
            return true;
        }

        let search = st.rest_buf();
        let from = YEAR.find_iter(search).last().map_or(0, |m| m.end());
        let Some(dash) = search[from..].rfind('-') else {
            return false;
        };
        let j = st.i + from + dash;
        let s = &st.src[j + 1..st.n];
        let group = s.trim_matches([' ', '\t', '_']);

        let valid = !group.is_empty()
            && (!s.contains(INVALID) || (s.chars().count() <= 14 && NAME.is_match(group)))
            && !registry.is_short(group)
            && st
                .tail
                .front()
                .map_or(true, |t| !t.text().starts_with([']', ')', '}']));
        if !valid {
            return false;
        }

        st.tail.push_front(Tag::new(TagType::Group, None, [s, group]));
        st.tail.push_front(Tag::plain(TagType::Delim, "-"));
        st.n = j;
        true
    }
}
