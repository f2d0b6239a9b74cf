// Break marker characters and helpers for inserting/removing them.

use serde::{Deserialize, Serialize};

/// SOFT HYPHEN: the default in-word break marker.
pub const SOFT_HYPHEN: char = '\u{00AD}';

/// ZERO WIDTH SPACE: the default break opportunity marker for URLs and
/// after literal hyphens.
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// ZERO WIDTH NON-JOINER. Accepted inside words by the word matcher so that
/// words carrying one are not split into separate tokens.
pub const ZERO_WIDTH_NON_JOINER: char = '\u{200C}';

/// NO-BREAK SPACE, used by orphan control.
pub const NO_BREAK_SPACE: char = '\u{00A0}';

/// The pair of characters the engine inserts into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    /// Inserted at legal in-word break points.
    pub break_marker: char,
    /// Inserted after URL delimiter runs and after literal hyphens.
    pub url_marker: char,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            break_marker: SOFT_HYPHEN,
            url_marker: ZERO_WIDTH_SPACE,
        }
    }
}

impl Markers {
    /// Whether `c` is one of the two marker characters.
    #[inline]
    pub fn is_marker(&self, c: char) -> bool {
        c == self.break_marker || c == self.url_marker
    }

    /// Whether `text` contains either marker.
    pub fn contains_any(&self, text: &str) -> bool {
        text.chars().any(|c| self.is_marker(c))
    }

    /// Remove every occurrence of both markers from `text`.
    pub fn strip(&self, text: &str) -> String {
        text.chars().filter(|&c| !self.is_marker(c)).collect()
    }

    /// Remove only the in-word break marker from `text`.
    pub fn strip_break(&self, text: &str) -> String {
        text.chars().filter(|&c| c != self.break_marker).collect()
    }
}
