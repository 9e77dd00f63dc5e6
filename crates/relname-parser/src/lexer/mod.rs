//! Lexer chain: splits a release name into classified [`Tag`]s.
//!
//! A [`Scanner`] first runs its once-lexers, which peel tags off either
//! end of the input (whitespace, extension, bracketed metadata, group).
//! The remaining span is consumed left to right: at each position a
//! delimiter run is taken first, then each repeating lexer is tried in
//! priority order, and finally a run of plain text up to the next
//! delimiter is emitted.
//!
//! Every tag's first value is the exact slice it consumed, so joining
//! `values()[0]` over the output reproduces the input.

mod audio;
mod date;
mod disc;
mod episode;
mod ext;
mod genre;
mod group;
mod id;
mod meta;
mod series;
mod token;
mod trim;
mod version;
mod vocab;

pub(crate) use date::month_number;

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use regex::{Captures, Regex, RegexBuilder};
use tracing::trace;

use crate::error::{Error, Result};
use crate::model::{Tag, TagType};
use crate::registry::Registry;
use token::Token;

/// Delimiter characters separating words in a release name.
pub const DELIMITERS: &str = "\t\n\x0c\r ()+,-._/\\[]{}~";

/// Whether `c` separates words.
pub(crate) fn is_delim(c: char) -> bool {
    DELIMITERS.contains(c)
}

/// Cursor over one input.
///
/// `buf` is `src` with `_`, `,` and `+` replaced by spaces; both have the
/// same byte layout so offsets are interchangeable. Tags peeled off the
/// end of the input collect in `tail` in input order.
pub(crate) struct LexState<'a> {
    pub src: &'a str,
    pub buf: &'a str,
    pub i: usize,
    pub n: usize,
    pub head: Vec<Tag>,
    pub tail: VecDeque<Tag>,
}

impl<'a> LexState<'a> {
    fn new(src: &'a str, buf: &'a str) -> Self {
        Self {
            src,
            buf,
            i: 0,
            n: src.len(),
            head: Vec::new(),
            tail: VecDeque::new(),
        }
    }

    /// Unconsumed input.
    pub fn rest(&self) -> &'a str {
        &self.src[self.i..self.n]
    }

    /// Unconsumed input with word separators blanked.
    pub fn rest_buf(&self) -> &'a str {
        &self.buf[self.i..self.n]
    }

    /// Source text of a capture made against [`LexState::rest_buf`] or
    /// [`LexState::rest`].
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.src[self.i + start..self.i + end]
    }

    /// Appends tags and advances past `len` bytes.
    pub fn emit(&mut self, len: usize, tags: impl IntoIterator<Item = Tag>) {
        self.head.extend(tags);
        self.i += len;
    }

    fn finish(self) -> (Vec<Tag>, usize) {
        let pivot = self.head.len();
        let mut tags = self.head;
        tags.extend(self.tail);
        (tags, pivot)
    }
}

/// One stage of the lexer chain.
pub(crate) trait Lexer: fmt::Debug + Send + Sync {
    /// Name used in trace output.
    fn name(&self) -> &'static str;

    /// Skipped until some earlier lexer has produced a tag.
    fn not_first(&self) -> bool {
        false
    }

    /// Attempts to consume input at `st.i`. Returns true on success.
    fn lex(&self, registry: &Registry, st: &mut LexState<'_>) -> bool;
}

/// Compiled lexer chain bound to a registry.
#[derive(Debug)]
pub struct Scanner {
    registry: Arc<Registry>,
    once: Vec<Box<dyn Lexer>>,
    multi: Vec<Box<dyn Lexer>>,
}

impl Scanner {
    /// Compiles the lexer chain for `registry`.
    ///
    /// Several lexers assemble their patterns from vocabulary entries, so
    /// a registry with a malformed entry is rejected here.
    pub fn new(registry: Arc<Registry>) -> Result<Self> {
        use vocab::{Boundary, VocabLexer};

        let reg = registry.as_ref();
        let word = |typ| VocabLexer::new(reg, typ, Boundary::Word, true);
        let once: Vec<Box<dyn Lexer>> = vec![
            Box::new(trim::TrimLexer::new()?),
            Box::new(ext::ExtLexer::new(reg)?),
            Box::new(meta::MetaLexer::new()?),
            Box::new(group::GroupLexer::new(reg)?),
        ];
        let multi: Vec<Box<dyn Lexer>> = vec![
            Box::new(word(TagType::Size)?),
            Box::new(word(TagType::Platform)?),
            Box::new(word(TagType::Arch)?),
            Box::new(word(TagType::Source)?),
            Box::new(word(TagType::Resolution)?),
            Box::new(VocabLexer::new(reg, TagType::Collection, Boundary::Delim, true)?),
            Box::new(series::SeriesLexer::new()?),
            Box::new(disc::DiscSourceYearLexer::new()?),
            Box::new(disc::DiscLexer::new()?),
            Box::new(date::DateLexer::new()?),
            Box::new(version::VersionLexer::new()?),
            Box::new(VocabLexer::new(reg, TagType::Codec, Boundary::Delim, true)?),
            Box::new(VocabLexer::new(reg, TagType::Hdr, Boundary::Delim, true)?),
            Box::new(audio::AudioLexer::new(reg)?),
            Box::new(word(TagType::Channels)?),
            Box::new(word(TagType::Other)?),
            Box::new(word(TagType::Cut)?),
            Box::new(word(TagType::Edition)?),
            Box::new(VocabLexer::new(reg, TagType::Language, Boundary::Word, false)?),
            Box::new(word(TagType::Region)?),
            Box::new(word(TagType::Container)?),
            Box::new(genre::GenreLexer::new(reg)?),
            Box::new(id::IdLexer::new()?),
            Box::new(episode::EpisodeLexer::new()?),
        ];
        Ok(Self {
            registry,
            once,
            multi,
        })
    }

    /// Registry the chain was compiled from.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Lexes `src` into tags.
    ///
    /// Returns the tags and the pivot: the index of the first tag peeled
    /// off the end of the input.
    pub fn scan(&self, src: &str) -> (Vec<Tag>, usize) {
        let buf: String = src
            .chars()
            .map(|c| if matches!(c, '_' | ',' | '+') { ' ' } else { c })
            .collect();
        let mut st = LexState::new(src, &buf);

        for lexer in &self.once {
            lexer.lex(&self.registry, &mut st);
        }

        let mut not_first = false;
        while st.i < st.n {
            self.step(&mut st, &mut not_first);
        }

        let (tags, pivot) = st.finish();
        trace!(input = src, tags = tags.len(), pivot, "scanned");
        (tags, pivot)
    }

    fn step(&self, st: &mut LexState<'_>, not_first: &mut bool) {
        let rest = st.rest();
        if rest.starts_with("...") {
            st.emit(3, [Tag::plain(TagType::Delim, "...")]);
            return;
        }

        let run = token::first_run(rest);
        if let Some((Token::Delims, len)) = run {
            st.emit(len, [Tag::plain(TagType::Delim, &rest[..len])]);
            return;
        }

        let before = st.head.len();
        for lexer in &self.multi {
            if lexer.not_first() && !*not_first {
                continue;
            }
            if lexer.lex(&self.registry, st) {
                trace!(lexer = lexer.name(), at = before, "lexer hit");
                *not_first |= st.head.len() != before;
                return;
            }
        }

        let len = match run {
            Some((Token::Text, len)) => len,
            _ => rest.find(is_delim).unwrap_or(rest.len()),
        };
        st.emit(len, [Tag::plain(TagType::Text, &rest[..len])]);
        *not_first = true;
    }
}

/// Compiles `pattern` for the lexer called `lexer`.
pub(crate) fn compile(lexer: &'static str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .size_limit(1 << 26)
        .build()
        .map_err(|source| Error::Lexer {
            lexer,
            source: Box::new(source),
        })
}

/// Compiles each pattern with a case-insensitive flag.
pub(crate) fn compile_all(lexer: &'static str, patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| compile(lexer, &format!("(?i){}", p)))
        .collect()
}

/// Alternation of every entry's recognition pattern in `category`.
pub(crate) fn alternation(registry: &Registry, category: TagType) -> String {
    registry
        .infos(category)
        .iter()
        .map(|info| info.re_pattern().into_owned())
        .collect::<Vec<_>>()
        .join("|")
}

/// Byte range of a named group, if it matched non-empty text.
pub(crate) fn group_span(caps: &Captures<'_>, name: &str) -> Option<(usize, usize)> {
    caps.name(name)
        .filter(|m| !m.is_empty())
        .map(|m| (m.start(), m.end()))
}
