//! Character-level text canonicalization.
//!
//! A [`Collapser`] decomposes its input (NFD), filters it character by
//! character, then recomposes (NFC). Two standing configurations are
//! exposed as [`clean`] and [`normalize`].

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Contextual per-character rewrite: `(char, previous output, next input)`.
/// Returning `None` drops the character.
pub type Transform = fn(char, Option<char>, Option<char>) -> Option<char>;

/// A configurable character filter.
#[derive(Debug, Clone)]
pub struct Collapser {
    lower: bool,
    trim: bool,
    remove: &'static str,
    space: &'static str,
    transform: Option<Transform>,
}

impl Collapser {
    /// Creates a collapser.
    ///
    /// Characters in `space` collapse to a single `' '`; characters in
    /// `remove` are dropped.
    pub const fn new(
        lower: bool,
        trim: bool,
        remove: &'static str,
        space: &'static str,
        transform: Option<Transform>,
    ) -> Self {
        Self {
            lower,
            trim,
            remove,
            space,
            transform,
        }
    }

    /// Applies the filter to `text`.
    pub fn apply(&self, text: &str) -> String {
        let decomposed: Vec<char> = text.nfd().collect();
        let mut start = 0;
        if self.trim {
            start = decomposed
                .iter()
                .position(|c| !self.space.contains(*c) && !self.remove.contains(*c))
                .unwrap_or(decomposed.len());
        }

        let mut out = String::with_capacity(text.len());
        let mut prev: Option<char> = None;
        for (idx, &c) in decomposed.iter().enumerate().skip(start) {
            if is_combining_mark(c) {
                continue;
            }
            let mut r = c;
            if self.space.contains(r) {
                if prev == Some(' ') {
                    continue;
                }
                r = ' ';
            } else if self.remove.contains(r) {
                continue;
            }
            if let Some(transform) = self.transform {
                match transform(r, prev, decomposed.get(idx + 1).copied()) {
                    Some(t) => r = t,
                    None => continue,
                }
            }
            if self.lower {
                out.extend(r.to_lowercase());
            } else {
                out.push(r);
            }
            prev = out.chars().next_back();
        }

        if self.trim {
            out.truncate(out.trim_end().len());
        }
        out.nfc().collect()
    }
}

/// Trims, drops apostrophes and collapses whitespace, preserving case.
pub const CLEANER: Collapser = Collapser::new(false, true, "'", " \t\r\n\x0c", None);

/// Lowercases and strips punctuation for title comparison.
pub const NORMALIZER: Collapser = Collapser::new(
    true,
    true,
    "`':;~!@#%^*=+()[]{}<>/?|\\\",",
    " \t\r\n\x0c._",
    Some(currency_and_dash),
);

fn currency_and_dash(r: char, prev: Option<char>, next: Option<char>) -> Option<char> {
    let alpha = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphabetic());
    match r {
        '-' if prev.is_some_and(char::is_whitespace) => None,
        '$' if alpha(prev) || alpha(next) => Some('S'),
        '£' if alpha(prev) || alpha(next) => Some('L'),
        '$' | '£' => None,
        _ => Some(r),
    }
}

/// Applies [`CLEANER`].
pub fn clean(s: &str) -> String {
    CLEANER.apply(s)
}

/// Applies [`NORMALIZER`].
pub fn normalize(s: &str) -> String {
    NORMALIZER.apply(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_and_trims() {
        assert_eq!(clean("  Don't \t Stop\n "), "Dont Stop");
        assert_eq!(clean("   "), "");
        assert_eq!(clean("Form\x0cFeed"), "Form Feed");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn test_normalize_lowercases_and_strips() {
        assert_eq!(normalize("The"), "the");
        assert_eq!(normalize("  The.Matrix_(1999) "), "the matrix 1999");
        assert_eq!(normalize("Café"), "cafe");
        assert_eq!(normalize("Form\x0cFeed"), "form feed");
    }

    #[test]
    fn test_normalize_drops_dash_after_space() {
        assert_eq!(normalize("A -B"), "a b");
        assert_eq!(normalize("A-B"), "a-b");
    }

    #[test]
    fn test_normalize_currency() {
        assert_eq!(normalize("Ke$ha"), "kesha");
        assert_eq!(normalize("£ondon"), "london");
        assert_eq!(normalize("100 $"), "100");
    }
}
