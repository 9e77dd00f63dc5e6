//! Bracketed metadata at either end of the input: `[REQ]`, `[site]`,
//! `[ABCD1234]`, `{{password}}`, `[[key:value]]`.

use std::collections::HashSet;

use regex::Regex;

use super::{compile, is_delim, LexState, Lexer};
use crate::error::Result;
use crate::model::{Tag, TagType};
use crate::registry::Registry;

/// `(key, open, close, body)`. An empty key takes the key from the first
/// capture of a two-capture body.
const FORMS: [(&str, &str, &str, &str); 8] = [
    ("", "[[", "]]", r"([a-zA-Z][a-zA-Z0-9_]{0,15}):\s*([^ \t\]]{1,32})"),
    ("req", "[", "]", r"(REQ(?:UEST)?)"),
    ("req", "(", ")", r"(REQ(?:UEST)?)"),
    ("req", "{", "}", r"(REQ(?:UEST)?)"),
    ("sum", "[", "]", r"([0-9A-F]{8})"),
    ("site", "[", "]", r"([^ \t\]]{1,32})"),
    ("site", "-={", "}=-", r"([^ \t\}]{1,32})"),
    ("pass", "{{", "}}", r"([^ \t}]{1,32})"),
];

#[derive(Debug)]
struct Form {
    key: &'static str,
    short_open: bool,
    prefix: Regex,
    suffix: Regex,
}

impl Form {
    /// `(consumed text, key, value)` of a match.
    fn parse<'s>(&self, re: &Regex, s: &'s str) -> Option<(&'s str, &'s str, &'s str)> {
        let caps = re.captures(s)?;
        let full = caps.get(0)?.as_str();
        if self.key.is_empty() {
            Some((full, caps.get(1)?.as_str(), caps.get(2)?.as_str()))
        } else {
            Some((full, self.key, caps.get(1)?.as_str()))
        }
    }
}

#[derive(Debug)]
pub(crate) struct MetaLexer {
    forms: Vec<Form>,
}

impl MetaLexer {
    pub fn new() -> Result<Self> {
        let forms = FORMS
            .iter()
            .map(|&(key, open, close, body)| {
                let inner = format!(
                    r"\s*{}\s*{}\s*{}\s*",
                    regex::escape(open),
                    body,
                    regex::escape(close)
                );
                Ok(Form {
                    key,
                    short_open: open.chars().count() == 1,
                    prefix: compile("meta", &format!("^{}", inner))?,
                    suffix: compile("meta", &format!("{}$", inner))?,
                })
            })
            .collect::<Result<_>>()?;
        Ok(Self { forms })
    }

    fn find<'s>(
        &self,
        registry: &Registry,
        seen: &HashSet<String>,
        s: &'s str,
        suffix: bool,
    ) -> Option<Tag> {
        self.forms.iter().find_map(|form| {
            let re = if suffix { &form.suffix } else { &form.prefix };
            let (full, key, value) = form.parse(re, s)?;
            let accepted = !seen.contains(key)
                && !(form.short_open && registry.is_short(value))
                && !value.contains([' ', '\t', '\r', '\n', '\x0c', '+']);
            accepted.then(|| Tag::new(TagType::Meta, None, [full, key, value]))
        })
    }
}

impl Lexer for MetaLexer {
    fn name(&self) -> &'static str {
        "meta"
    }

    fn lex(&self, registry: &Registry, st: &mut LexState<'_>) -> bool {
        let mut seen = HashSet::new();

        let mut pending = String::new();
        while st.i < st.n {
            if let Some(tag) = self.find(registry, &seen, st.rest(), false) {
                if !pending.is_empty() {
                    st.head
                        .push(Tag::plain(TagType::Delim, &std::mem::take(&mut pending)));
                }
                let (_, key) = tag.meta();
                seen.insert(key.to_string());
                let len = tag.original().len();
                st.emit(len, [tag]);
                continue;
            }
            match st.rest().chars().next() {
                Some(c) if is_delim(c) => {
                    pending.push(c);
                    st.i += c.len_utf8();
                }
                _ => break,
            }
        }
        st.i -= pending.len();

        let mut pending = String::new();
        while st.i < st.n {
            if let Some(tag) = self.find(registry, &seen, st.rest(), true) {
                if !pending.is_empty() {
                    st.tail
                        .push_front(Tag::plain(TagType::Delim, &std::mem::take(&mut pending)));
                }
                let (_, key) = tag.meta();
                seen.insert(key.to_string());
                st.n -= tag.original().len();
                st.tail.push_front(tag);
                continue;
            }
            match st.rest().chars().next_back() {
                Some(c) if is_delim(c) => {
                    pending.insert(0, c);
                    st.n -= c.len_utf8();
                }
                _ => break,
            }
        }
        if !pending.is_empty() {
            st.tail.push_front(Tag::plain(TagType::Delim, &pending));
        }
        true
    }
}
