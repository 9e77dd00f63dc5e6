//! Version numbers: `v1.2.3`, `Version 2`, `v20120304`, `1.2.345`.
//!
//! Never the first token of a name, so titles such as `V for Vendetta`
//! are not split.

use std::sync::LazyLock;

use regex::Regex;

use super::{compile_all, LexState, Lexer};
use crate::error::Result;
use crate::model::{Tag, TagType};
use crate::registry::Registry;

const PATTERNS: [&str; 5] = [
    r"^(?:version[\-\_\. ])?(?P<v>v[\-\_\. ]?\d{1,2}(?:[\._ ]\d{1,2}[a-z]?\d*){0,3})\b",
    r"^(?:version[\-\_\. ])?(?P<v>v[\-\_\. ]?(?:19|20)\d\d(?:[\-\_\. ]?\d\d?){0,2})\b",
    r"^(?:version[\-\_\. ])?(?P<v>v[\-\_\. ]?\d{4,10})\b",
    r"^version[\-\_\. ](?P<V>\d{2,}|\d{2}[a-z]{1,2}\d{1,2})\b",
    r"^(?P<u>\d{1,3}\.\d{1,3}\.\d{1,16}(?:\.\d{1,16})?)\b",
];

static PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^version[ ._\-]+").unwrap_or_else(|e| panic!("invalid version regex: {}", e))
});

#[derive(Debug)]
pub(crate) struct VersionLexer {
    patterns: Vec<Regex>,
}

impl VersionLexer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: compile_all("version", &PATTERNS)?,
        })
    }
}

impl Lexer for VersionLexer {
    fn name(&self) -> &'static str {
        "version"
    }

    fn not_first(&self) -> bool {
        true
    }

    fn lex(&self, _: &Registry, st: &mut LexState<'_>) -> bool {
        for re in &self.patterns {
            let Some(caps) = re.captures(st.rest_buf()) else {
                continue;
            };
            let len = caps[0].len();
            let s = st.slice(0, len);
            let version = if caps.name("v").is_some() {
                let lower = s.to_lowercase();
                PREFIX.replace(&lower, "").replace(' ', ".")
            } else if let Some(v) = caps.name("V") {
                v.as_str().to_string()
            } else if let Some(u) = caps.name("u") {
                format!("v{}", u.as_str())
            } else {
                continue;
            };
            st.emit(len, [Tag::new(TagType::Version, None, [s, version.as_str()])]);
            return true;
        }
        false
    }
}
