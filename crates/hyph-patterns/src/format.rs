// Pattern file record.
//
// One JSON object per language:
//
//   {
//     "leftmin": 2, "rightmin": 3,
//     "shortestPattern": 2, "longestPattern": 5,
//     "specialChars": "",
//     "patterns": { "3": "h1yi1o", "4": "he2nn2at" },
//     "exceptions": "as-so-ciate, ta-ble",
//     "charSubstitution": { "é": "e" }
//   }
//
// Each `patterns` entry concatenates patterns whose text (digits included)
// is exactly the given number of characters long.

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::PatternError;

/// Raw per-language pattern data as read from a pattern file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSource {
    /// Minimum characters kept before a break.
    #[serde(rename = "leftmin")]
    pub left_min: usize,
    /// Minimum characters kept after a break.
    #[serde(rename = "rightmin")]
    pub right_min: usize,
    /// Length of the shortest pattern key.
    pub shortest_pattern: usize,
    /// Length of the longest pattern key.
    pub longest_pattern: usize,
    /// Extra word characters beyond ASCII letters. May be percent-escaped.
    #[serde(default)]
    pub special_chars: String,
    /// Pattern-text length -> concatenated patterns of that length.
    pub patterns: BTreeMap<usize, String>,
    /// Comma+space separated hyphenated exception words.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exceptions: Option<String>,
    /// Single-character substitutions applied to the lookup form.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub char_substitution: BTreeMap<String, String>,
}

impl PatternSource {
    /// Parse a pattern file from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, PatternError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize back to JSON.
    pub fn to_json(&self) -> Result<String, PatternError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the scalar parameters.
    pub fn validate(&self) -> Result<(), PatternError> {
        if self.left_min == 0 {
            return Err(invalid("leftmin", "must be positive"));
        }
        if self.right_min == 0 {
            return Err(invalid("rightmin", "must be positive"));
        }
        if self.shortest_pattern == 0 {
            return Err(invalid("shortestPattern", "must be positive"));
        }
        if self.longest_pattern < self.shortest_pattern {
            return Err(invalid(
                "longestPattern",
                format!(
                    "{} is smaller than shortestPattern {}",
                    self.longest_pattern, self.shortest_pattern
                ),
            ));
        }
        Ok(())
    }

    /// The special characters with percent escapes decoded.
    pub fn decoded_special_chars(&self) -> Result<String, PatternError> {
        percent_decode_str(&self.special_chars)
            .decode_utf8()
            .map(|s| s.into_owned())
            .map_err(|e| invalid("specialChars", e.to_string()))
    }

    /// The character substitution table as `char` pairs.
    pub fn substitutions(&self) -> Result<Vec<(char, char)>, PatternError> {
        self.char_substitution
            .iter()
            .map(|(from, to)| match (single_char(from), single_char(to)) {
                (Some(f), Some(t)) => Ok((f, t)),
                _ => Err(invalid(
                    "charSubstitution",
                    format!("{from:?} -> {to:?} is not a single-character mapping"),
                )),
            })
            .collect()
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> PatternError {
    PatternError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "leftmin": 2,
        "rightmin": 3,
        "shortestPattern": 2,
        "longestPattern": 5,
        "specialChars": "%C3%A4%C3%B6",
        "patterns": { "3": "h1yi1o", "4": "he2nn2at" },
        "exceptions": "ta-ble",
        "charSubstitution": { "é": "e" }
    }"#;

    #[test]
    fn parses_sample() {
        let src = PatternSource::from_json(SAMPLE).unwrap();
        assert_eq!(src.left_min, 2);
        assert_eq!(src.right_min, 3);
        assert_eq!(src.shortest_pattern, 2);
        assert_eq!(src.longest_pattern, 5);
        assert_eq!(src.patterns[&3], "h1yi1o");
        assert_eq!(src.patterns[&4], "he2nn2at");
        assert_eq!(src.exceptions.as_deref(), Some("ta-ble"));
        src.validate().unwrap();
    }

    #[test]
    fn decodes_percent_escaped_special_chars() {
        let src = PatternSource::from_json(SAMPLE).unwrap();
        assert_eq!(src.decoded_special_chars().unwrap(), "\u{00E4}\u{00F6}");
    }

    #[test]
    fn json_unicode_escapes_are_handled_by_parser() {
        let json = r#"{"leftmin":1,"rightmin":1,"shortestPattern":1,"longestPattern":1,
            "specialChars":"\u00e4","patterns":{}}"#;
        let src = PatternSource::from_json(json).unwrap();
        assert_eq!(src.decoded_special_chars().unwrap(), "\u{00E4}");
    }

    #[test]
    fn substitutions_are_single_chars() {
        let src = PatternSource::from_json(SAMPLE).unwrap();
        assert_eq!(src.substitutions().unwrap(), vec![('\u{00E9}', 'e')]);
    }

    #[test]
    fn multi_char_substitution_is_rejected() {
        let mut src = PatternSource::from_json(SAMPLE).unwrap();
        src.char_substitution
            .insert("ae".to_string(), "a".to_string());
        assert!(matches!(
            src.substitutions(),
            Err(PatternError::InvalidParameter { name: "charSubstitution", .. })
        ));
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"leftmin":2,"rightmin":2,"shortestPattern":1,"longestPattern":3,
            "patterns":{"2":"a1"}}"#;
        let src = PatternSource::from_json(json).unwrap();
        assert!(src.exceptions.is_none());
        assert!(src.special_chars.is_empty());
        assert!(src.char_substitution.is_empty());
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let mut src = PatternSource::from_json(SAMPLE).unwrap();
        src.longest_pattern = 1;
        assert!(matches!(
            src.validate(),
            Err(PatternError::InvalidParameter { name: "longestPattern", .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_leftmin() {
        let mut src = PatternSource::from_json(SAMPLE).unwrap();
        src.left_min = 0;
        assert!(src.validate().is_err());
    }

    #[test]
    fn json_round_trip_preserves_record() {
        let src = PatternSource::from_json(SAMPLE).unwrap();
        let again = PatternSource::from_json(&src.to_json().unwrap()).unwrap();
        assert_eq!(src, again);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            PatternSource::from_json("{ not json"),
            Err(PatternError::Json(_))
        ));
    }
}
