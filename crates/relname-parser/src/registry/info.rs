//! Vocabulary entries.

use std::borrow::Cow;

use regex::{Captures, Regex, RegexBuilder};

use crate::model::ReleaseType;

/// A single vocabulary entry: a canonical tag and how to recognize it.
#[derive(Debug, Clone)]
pub struct TagInfo {
    tag: String,
    title: String,
    regexp: String,
    other: String,
    typ: ReleaseType,
    excl: bool,
    matcher: Regex,
}

impl TagInfo {
    /// Creates an entry, compiling its anchored matcher.
    ///
    /// An empty `title` falls back to the tag itself. An empty `regexp`
    /// matches the tag literally.
    pub fn new(
        tag: impl Into<String>,
        title: impl Into<String>,
        regexp: impl Into<String>,
        other: impl Into<String>,
        typ: ReleaseType,
        excl: bool,
    ) -> Result<Self, regex::Error> {
        let tag = tag.into();
        let mut title = title.into();
        if title.is_empty() {
            title = tag.clone();
        }
        let regexp = repair_pattern(regexp.into());
        let body = if regexp.is_empty() {
            regex::escape(&tag)
        } else {
            regexp.clone()
        };
        let matcher = RegexBuilder::new(&format!("^(?:{})$", body))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            tag,
            title,
            regexp,
            other: other.into(),
            typ,
            excl,
            matcher,
        })
    }

    /// Canonical tag, possibly a `$n` template.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Display title, possibly a `$n` template.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Alternate string, empty when absent.
    pub fn other(&self) -> &str {
        &self.other
    }

    /// Release type the entry is associated with.
    pub fn release_type(&self) -> ReleaseType {
        self.typ
    }

    /// Whether the entry is only valid for its release type.
    pub fn is_exclusive(&self) -> bool {
        self.excl
    }

    /// Whether the canonical tag contains `$n` placeholders.
    pub fn is_template(&self) -> bool {
        self.tag.contains('$')
    }

    /// Unanchored pattern body used when building lexer alternations.
    pub fn re_pattern(&self) -> Cow<'_, str> {
        if self.regexp.is_empty() {
            Cow::Owned(regex::escape(&self.tag))
        } else {
            Cow::Borrowed(&self.regexp)
        }
    }

    /// Returns true if the whole of `s` matches this entry.
    pub fn is_match(&self, s: &str) -> bool {
        self.matcher.is_match(s)
    }

    /// Canonical form of `value`, resolving `$n` placeholders against this
    /// entry's own captures. Unresolved placeholders become empty.
    pub fn canonical(&self, value: &str) -> String {
        self.expand(&self.tag, value)
    }

    /// Display title of `value`, with the same placeholder resolution as
    /// [`TagInfo::canonical`].
    pub fn display_title(&self, value: &str) -> String {
        self.expand(&self.title, value)
    }

    fn expand(&self, template: &str, value: &str) -> String {
        if !template.contains('$') {
            return template.to_string();
        }
        let caps = self.matcher.captures(value);
        expand_template(template, caps.as_ref())
    }
}

/// Replaces `$n` with capture `n`. `Captures::expand` is not used because it
/// reads `$1p` as a group named `1p`.
fn expand_template(template: &str, caps: Option<&Captures<'_>>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let mut idx = None::<usize>;
        while let Some(&(_, d)) = chars.peek() {
            let Some(digit) = d.to_digit(10) else { break };
            idx = Some(idx.unwrap_or(0) * 10 + digit as usize);
            chars.next();
        }
        match idx {
            Some(n) => {
                if let Some(m) = caps.and_then(|c| c.get(n)) {
                    out.push_str(m.as_str());
                }
            }
            None => out.push('$'),
        }
    }
    out
}

/// Fixes a known-broken pattern in published vocabulary data.
fn repair_pattern(regexp: String) -> String {
    if regexp == r"collector[[\-\_\. ']?s[\-\_\. ]edition" {
        return r"collector[\-\_\. ]?s[\-\_\. ]edition".to_string();
    }
    regexp
}
