// Text-run application: tokenize a run, hyphenate its words and URLs, and
// copy the separators through untouched.

use hyph_core::markers::{Markers, NO_BREAK_SPACE};
use hyph_core::token::TokenKind;
use hyph_patterns::PatternTable;

use crate::config::{Callbacks, OrphanControl};
use crate::hyphenator::{hyphenate_url, hyphenate_word};

/// Result of hyphenating one text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub text: String,
    /// Words passed through the hyphenator.
    pub words: usize,
}

impl RunOutcome {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            words: 0,
        }
    }
}

/// Hyphenate every word, URL and email address in `text`.
///
/// Runs shorter than the table's minimum word length are returned as is.
/// The last token of the run is subject to `orphan_control` when it is a
/// word.
pub fn hyphenate_run(
    table: &PatternTable,
    markers: &Markers,
    orphan_control: OrphanControl,
    callbacks: &Callbacks,
    text: &str,
) -> RunOutcome {
    let matcher = table.matcher();
    if text.chars().count() < matcher.min_word_length() {
        return RunOutcome::unchanged(text);
    }

    let tokens: Vec<_> = matcher.tokens(text).collect();
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut words = 0;
    let mut last_end = 0;

    for (index, token) in tokens.iter().enumerate() {
        let separator = &text[last_end..token.start];
        last_end = token.end;

        let is_orphan = index + 1 == tokens.len() && token.kind == TokenKind::Word;
        match (token.kind, orphan_control) {
            (TokenKind::Word, OrphanControl::ForbidLastWord) if is_orphan => {
                out.push_str(separator);
                out.push_str(token.text);
            }
            (TokenKind::Word, OrphanControl::NonBreakingLast) if is_orphan => {
                push_with_nbsp_tail(&mut out, separator);
                out.push_str(token.text);
            }
            (TokenKind::Word, _) => {
                out.push_str(separator);
                out.push_str(&hyphenate_hooked(table, markers, callbacks, token.text));
                words += 1;
            }
            (TokenKind::Url | TokenKind::Email, _) => {
                out.push_str(separator);
                out.push_str(&hyphenate_url(markers, token.text));
            }
        }
    }
    out.push_str(&text[last_end..]);

    RunOutcome { text: out, words }
}

fn hyphenate_hooked(
    table: &PatternTable,
    markers: &Markers,
    callbacks: &Callbacks,
    word: &str,
) -> String {
    let language = table.language();
    let hyphenated = match &callbacks.before_word {
        Some(before) => hyphenate_word(table, markers, &before(word, language)),
        None => hyphenate_word(table, markers, word),
    };
    match &callbacks.after_word {
        Some(after) => after(&hyphenated, language),
        None => hyphenated,
    }
}

/// Push `separator` with its trailing run of spaces turned into no-break
/// spaces.
fn push_with_nbsp_tail(out: &mut String, separator: &str) {
    let head = separator.trim_end_matches(' ');
    out.push_str(head);
    for _ in 0..separator.len() - head.len() {
        out.push(NO_BREAK_SPACE);
    }
}

/// Strip both markers from `text`.
pub fn remove_markers(markers: &Markers, text: &str) -> String {
    markers.strip(text)
}
