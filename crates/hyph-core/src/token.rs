// Token kinds produced by the per-language word matcher.

use serde::{Deserialize, Serialize};

/// Classification of a matched token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// URL-like token (`scheme://host/path`, bare `host.tld`, IPv4).
    Url,
    /// Email-like token (`local@domain`).
    Email,
    /// Hyphenatable word.
    Word,
}

impl TokenKind {
    /// URL and email tokens are broken at delimiters, not by patterns.
    pub fn is_link(self) -> bool {
        matches!(self, TokenKind::Url | TokenKind::Email)
    }
}

/// A token matched inside a text run.
///
/// `start` and `end` are byte offsets into the text the token was matched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}
