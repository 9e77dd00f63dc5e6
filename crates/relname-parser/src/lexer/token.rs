//! Token types for the Logos-based run splitter.

use logos::Logos;

/// Runs the scanner falls back to when no lexer claims a position.
///
/// Delimiters and text partition every character, so the first token of
/// any non-empty input is one of the two.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    /// A run of word separators.
    #[regex(r"[\t\n\f\r ()+,\-._/\\\[\]{}~]+")]
    Delims,

    /// A run of anything else.
    #[regex(r"[^\t\n\f\r ()+,\-._/\\\[\]{}~]+")]
    Text,
}

/// Kind and byte length of the run at the start of `s`.
pub(crate) fn first_run(s: &str) -> Option<(Token, usize)> {
    let mut lex = Token::lexer(s);
    match lex.next()? {
        Ok(token) => Some((token, lex.span().end)),
        Err(()) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_delims() {
        assert_eq!(first_run("._-(x"), Some((Token::Delims, 4)));
    }

    #[test]
    fn test_first_run_text() {
        assert_eq!(first_run("Matrix.1999"), Some((Token::Text, 6)));
        assert_eq!(first_run("Amélie 2001"), Some((Token::Text, "Amélie".len())));
    }

    #[test]
    fn test_first_run_empty() {
        assert_eq!(first_run(""), None);
    }
}
