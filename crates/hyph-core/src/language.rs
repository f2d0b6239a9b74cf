// Language code normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned for language codes that cannot name a pattern table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageError {
    #[error("empty language code")]
    Empty,
    #[error("invalid character {ch:?} in language code {code:?}")]
    InvalidChar { code: String, ch: char },
}

/// A normalized language code: lowercase ASCII subtags joined by `-`.
///
/// `en_US`, `EN-us` and `en-us` all normalize to `en-us`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Parse and normalize a language code.
    pub fn parse(code: &str) -> Result<Self, LanguageError> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(LanguageError::Empty);
        }
        let mut normalized = String::with_capacity(trimmed.len());
        for ch in trimmed.chars() {
            match ch {
                'a'..='z' | '0'..='9' | '-' => normalized.push(ch),
                'A'..='Z' => normalized.push(ch.to_ascii_lowercase()),
                '_' => normalized.push('-'),
                _ => {
                    return Err(LanguageError::InvalidChar {
                        code: code.to_string(),
                        ch,
                    });
                }
            }
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary subtag (`en` for `en-us`).
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Candidate codes to try when looking up a table: the full code, then the
    /// primary subtag if it differs.
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        let primary = self.primary();
        let fallback = (primary != self.0).then_some(primary);
        std::iter::once(self.as_str()).chain(fallback)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = LanguageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_separator() {
        assert_eq!(LanguageTag::parse("en_US").unwrap().as_str(), "en-us");
        assert_eq!(LanguageTag::parse(" DE ").unwrap().as_str(), "de");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(LanguageTag::parse("  "), Err(LanguageError::Empty));
    }

    #[test]
    fn rejects_invalid_chars() {
        assert!(matches!(
            LanguageTag::parse("en/us"),
            Err(LanguageError::InvalidChar { ch: '/', .. })
        ));
    }

    #[test]
    fn primary_subtag() {
        assert_eq!(LanguageTag::parse("pt-br").unwrap().primary(), "pt");
        assert_eq!(LanguageTag::parse("fi").unwrap().primary(), "fi");
    }

    #[test]
    fn candidates_include_fallback_once() {
        let tag = LanguageTag::parse("en-gb").unwrap();
        assert_eq!(tag.candidates().collect::<Vec<_>>(), vec!["en-gb", "en"]);
        let tag = LanguageTag::parse("en").unwrap();
        assert_eq!(tag.candidates().collect::<Vec<_>>(), vec!["en"]);
    }
}
