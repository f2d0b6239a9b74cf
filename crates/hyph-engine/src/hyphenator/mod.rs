// Liang-style hyphenation over a prepared pattern table.
//
// The core scan works on the word's lookup form wrapped in `_` boundary
// characters. Every window whose length lies within the table's pattern
// bounds is looked up; matching patterns score the boundaries they cover and
// each boundary keeps its highest score. Odd scores are break points.
//
// Break points are reported as a pattern string with one character per word
// character:
//   `' '` = no break before this character
//   `'-'` = break allowed before this character

use hyph_core::character::is_url_delimiter;
use hyph_core::markers::Markers;
use hyph_patterns::PatternTable;

/// Word boundary marker wrapped around the lookup form.
const WORD_BOUNDARY: char = '_';

/// Compute the break pattern for `word`.
///
/// The returned string has the same length as `word` in characters. A break
/// before character `i` is only reported when `left_min <= i` and
/// `i <= len - right_min`, so no break ever falls at either end.
pub fn break_pattern(table: &PatternTable, word: &str) -> String {
    let lower = table.lookup_form(word);
    let len = lower.len();
    let mut pattern = vec![' '; len];
    if len == 0 {
        return String::new();
    }

    let mut wrapped = Vec::with_capacity(len + 2);
    wrapped.push(WORD_BOUNDARY);
    wrapped.extend_from_slice(&lower);
    wrapped.push(WORD_BOUNDARY);

    // weights[k] scores the boundary before wrapped[k].
    let mut weights = vec![0u8; wrapped.len() + 1];
    let shortest = table.shortest_pattern().max(1);
    let longest = table.longest_pattern();
    let mut key = String::with_capacity(longest * 4);

    for start in 0..wrapped.len() {
        let remaining = wrapped.len() - start;
        for width in shortest..=longest.min(remaining) {
            key.clear();
            key.extend(&wrapped[start..start + width]);
            let Some(found) = table.patterns().get(&key) else {
                continue;
            };
            for &(boundary, weight) in found.points() {
                let slot = &mut weights[start + usize::from(boundary)];
                *slot = (*slot).max(weight);
            }
        }
    }

    // Word boundary i (before word[i]) is wrapped boundary i + 1.
    let first = table.left_min().max(1);
    let last = len.saturating_sub(table.right_min().max(1));
    for i in first..=last {
        if weights[i + 1] % 2 == 1 {
            pattern[i] = '-';
        }
    }
    pattern.into_iter().collect()
}

/// Insert `separator` into `word` wherever `pattern` marks a break.
pub fn insert_breaks(word: &str, pattern: &str, separator: char) -> String {
    let mut result = String::with_capacity(word.len() + pattern.len());
    for (ch, mark) in word.chars().zip(pattern.chars().chain(std::iter::repeat(' '))) {
        if mark == '-' {
            result.push(separator);
        }
        result.push(ch);
    }
    result
}

/// Hyphenate a single word.
///
/// Words that already contain a marker are returned unchanged, so applying
/// the function twice gives the same result as applying it once. Exceptions
/// take precedence over patterns; words with literal hyphens are hyphenated
/// segment by segment with a break opportunity after each inner hyphen.
pub fn hyphenate_word(table: &PatternTable, markers: &Markers, word: &str) -> String {
    if word.is_empty() || markers.contains_any(word) {
        return word.to_string();
    }
    if let Some(hit) = table.cached(word) {
        return hit;
    }
    // Exceptions are keyed by their hyphen-free spelling.
    if let Some(exception) = table.exception(&word.replace('-', "")) {
        return exception.replace('-', markers.break_marker.encode_utf8(&mut [0; 4]));
    }
    if word.contains('-') {
        return hyphenate_compound(table, markers, word);
    }

    let pattern = break_pattern(table, word);
    let result = insert_breaks(word, &pattern, markers.break_marker);
    log::trace!("{word} -> {pattern:?}");
    table.store_cached(word, &result);
    result
}

fn hyphenate_compound(table: &PatternTable, markers: &Markers, word: &str) -> String {
    let mut result = String::with_capacity(word.len() + 8);
    let mut segments = word.split('-').peekable();
    while let Some(segment) = segments.next() {
        result.push_str(&hyphenate_word(table, markers, segment));
        if let Some(next) = segments.peek() {
            result.push('-');
            if !next.is_empty() {
                result.push(markers.url_marker);
            }
        }
    }
    result
}

/// Insert the URL marker after every run of URL delimiters.
///
/// URLs that already contain a marker are returned unchanged.
pub fn hyphenate_url(markers: &Markers, url: &str) -> String {
    if markers.contains_any(url) {
        return url.to_string();
    }
    let mut result = String::with_capacity(url.len() + 8);
    let mut chars = url.chars().peekable();
    while let Some(c) = chars.next() {
        result.push(c);
        if is_url_delimiter(c) && !chars.peek().copied().is_some_and(is_url_delimiter) {
            result.push(markers.url_marker);
        }
    }
    result
}
