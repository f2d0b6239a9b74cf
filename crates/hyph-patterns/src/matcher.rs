// Token matcher: finds URLs, email addresses and hyphenatable words in a run
// of text.
//
// The alternatives are tried email first, then URL, then word, at each
// position. Email goes first because the URL alternative would otherwise
// claim the dotted local part of an address.

use hyph_core::markers::{Markers, ZERO_WIDTH_NON_JOINER};
use hyph_core::token::{Token, TokenKind};
use regex::Regex;

use crate::PatternError;

/// URL-like tokens: optional scheme, optional credentials, an IPv4 address
/// or a dotted host name, optional port, any number of path segments.
const URL_PATTERN: &str = concat!(
    r"(?:[A-Za-z0-9_]*://)?",
    r"(?:(?:[A-Za-z0-9_]*:)?[A-Za-z0-9_]*@)?",
    r"(?:(?:[0-9]{1,3}\.){3}[0-9]{1,3}|(?:www\.|[A-Za-z]\.)?[A-Za-z]+\.[a-z]{2,4})",
    r"(?::[0-9]*)?",
    r"(?:/[A-Za-z0-9_#!:.?+=&%@\-]*)*",
);

/// Email-like tokens.
const EMAIL_PATTERN: &str = r"[A-Za-z0-9_.\-]+@[A-Za-z0-9_.]+";

/// Compiled per-language token matcher.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    regex: Regex,
    min_word_length: usize,
}

impl WordMatcher {
    /// Compile a matcher whose word alternative accepts ASCII word characters,
    /// `special_chars`, the break marker, ZWNJ and `-`, at least
    /// `min_word_length` (clamped to 1) characters long. Matching is
    /// case-insensitive, so lowercase special characters also match their
    /// uppercase forms.
    pub fn new(
        special_chars: &str,
        markers: &Markers,
        min_word_length: usize,
    ) -> Result<Self, PatternError> {
        let min_word_length = min_word_length.max(1);
        let mut class = String::from("A-Za-z0-9_");
        for c in special_chars
            .chars()
            .chain([markers.break_marker, ZERO_WIDTH_NON_JOINER])
        {
            class.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        }
        class.push_str(r"\-");

        let pattern = format!(
            "(?i)({EMAIL_PATTERN})|({URL_PATTERN})|([{class}]{{{min_word_length},}})"
        );
        Ok(Self {
            regex: Regex::new(&pattern)?,
            min_word_length,
        })
    }

    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    /// Iterate over the tokens in `text`, left to right, non-overlapping.
    pub fn tokens<'t>(&'t self, text: &'t str) -> impl Iterator<Item = Token<'t>> + 't {
        self.regex.captures_iter(text).filter_map(|caps| {
            let (kind, m) = if let Some(m) = caps.get(1) {
                (TokenKind::Email, m)
            } else if let Some(m) = caps.get(2) {
                (TokenKind::Url, m)
            } else {
                (TokenKind::Word, caps.get(3)?)
            };
            Some(Token {
                kind,
                text: m.as_str(),
                start: m.start(),
                end: m.end(),
            })
        })
    }
}
