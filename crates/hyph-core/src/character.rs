// Character helpers for pattern matching and URL breaking.

/// Lowercase a single character without changing the character count.
///
/// Characters whose full lowercase mapping expands to several characters
/// (e.g. U+0130) are kept unchanged, so that positions in the lowercased
/// lookup form line up one-to-one with the original word.
pub fn simple_lower(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// The typographic apostrophe pattern files are written with.
pub const RIGHT_SINGLE_QUOTATION_MARK: char = '\u{2019}';

/// Normalize a character for pattern lookup: lowercase it and map the ASCII
/// apostrophe onto the typographic one.
#[inline]
pub fn lookup_form(c: char) -> char {
    match c {
        '\'' => RIGHT_SINGLE_QUOTATION_MARK,
        _ => simple_lower(c),
    }
}

/// Break weight of a pattern digit, or `None` for letters.
#[inline]
pub fn digit_weight(c: char) -> Option<u8> {
    c.to_digit(10).map(|d| d as u8)
}

/// Characters after which a URL may be broken.
const URL_DELIMITERS: &[char] = &[':', '/', '.', '?', '#', '&', '_', ',', ';', '!', '@'];

/// Whether `c` delimits URL components.
#[inline]
pub fn is_url_delimiter(c: char) -> bool {
    URL_DELIMITERS.contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_lower_ascii() {
        assert_eq!(simple_lower('A'), 'a');
        assert_eq!(simple_lower('z'), 'z');
    }

    #[test]
    fn simple_lower_non_ascii() {
        assert_eq!(simple_lower('\u{00C4}'), '\u{00E4}');
        assert_eq!(simple_lower('\u{0416}'), '\u{0436}');
    }

    #[test]
    fn simple_lower_keeps_expanding_chars() {
        // LATIN CAPITAL LETTER I WITH DOT ABOVE lowercases to two chars
        assert_eq!(simple_lower('\u{0130}'), '\u{0130}');
    }

    #[test]
    fn apostrophe_lookup_form() {
        assert_eq!(lookup_form('\''), '\u{2019}');
        assert_eq!(lookup_form('D'), 'd');
    }

    #[test]
    fn digit_weights() {
        assert_eq!(digit_weight('5'), Some(5));
        assert_eq!(digit_weight('0'), Some(0));
        assert_eq!(digit_weight('a'), None);
    }

    #[test]
    fn url_delimiters() {
        for c in [':', '/', '.', '?', '#', '&', '_', ',', ';', '!', '@'] {
            assert!(is_url_delimiter(c), "{c}");
        }
        assert!(!is_url_delimiter('-'));
        assert!(!is_url_delimiter('a'));
    }
}
