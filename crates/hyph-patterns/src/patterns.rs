// Pattern decompilation: length-grouped blocks -> key lookup.
//
// A pattern such as `hen5at` annotates the key `henat` with break weights:
// the digit 5 sits after the third letter, so it scores the boundary between
// `n` and `a`. Boundaries without a digit have weight 0.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use hyph_core::character::digit_weight;

use crate::PatternError;

/// A single decompiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// The pattern text as written, digits included.
    text: Box<str>,
    /// Number of letters in the key.
    key_len: usize,
    /// `(boundary, weight)` pairs. Boundary `k` lies before the key's `k`-th
    /// letter, so `0` is the boundary preceding the window and `key_len` the
    /// one following it.
    points: Box<[(u8, u8)]>,
}

impl Pattern {
    /// Parse one pattern text into its key and weights.
    pub fn parse(text: &str) -> Result<(String, Pattern), String> {
        let mut key = String::with_capacity(text.len());
        let mut points = Vec::new();
        let mut letters = 0usize;
        let mut previous_digit = false;

        for c in text.chars() {
            match digit_weight(c) {
                Some(weight) => {
                    if previous_digit {
                        return Err(format!("adjacent digits in {text:?}"));
                    }
                    let boundary = u8::try_from(letters)
                        .map_err(|_| format!("pattern {text:?} is too long"))?;
                    if weight > 0 {
                        points.push((boundary, weight));
                    }
                    previous_digit = true;
                }
                None => {
                    key.push(c);
                    letters += 1;
                    previous_digit = false;
                }
            }
        }

        if letters == 0 {
            return Err(format!("pattern {text:?} has no letters"));
        }

        Ok((
            key,
            Pattern {
                text: text.into(),
                key_len: letters,
                points: points.into_boxed_slice(),
            },
        ))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn points(&self) -> &[(u8, u8)] {
        &self.points
    }
}

/// All patterns of one language, indexed by key.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    /// Patterns in source order.
    entries: Vec<Pattern>,
    /// Key -> index into `entries`.
    index: HashMap<Box<str>, u32>,
    shortest_key: usize,
    longest_key: usize,
}

impl PatternSet {
    /// Decompile length-grouped pattern blocks.
    ///
    /// Each block string is cut into slices of exactly `length` characters;
    /// a trailing partial slice, a slice without letters or a key seen twice
    /// makes the whole set malformed.
    pub fn decompile(blocks: &BTreeMap<usize, String>) -> Result<Self, PatternError> {
        let mut set = PatternSet {
            shortest_key: usize::MAX,
            ..PatternSet::default()
        };

        for (&length, block) in blocks {
            let malformed = |reason: String| PatternError::MalformedPattern { length, reason };
            if length == 0 {
                return Err(malformed("pattern length must be positive".to_string()));
            }

            let chars: Vec<char> = block.chars().collect();
            if chars.len() % length != 0 {
                return Err(malformed(format!(
                    "{} characters is not a multiple of {length}",
                    chars.len()
                )));
            }

            for slice in chars.chunks(length) {
                let text: String = slice.iter().collect();
                let (key, pattern) = Pattern::parse(&text).map_err(malformed)?;
                if set.index.contains_key(key.as_str()) {
                    return Err(malformed(format!("duplicate pattern key {key:?}")));
                }
                set.shortest_key = set.shortest_key.min(pattern.key_len);
                set.longest_key = set.longest_key.max(pattern.key_len);
                let idx = u32::try_from(set.entries.len())
                    .map_err(|_| malformed("too many patterns".to_string()))?;
                set.index.insert(key.into_boxed_str(), idx);
                set.entries.push(pattern);
            }
        }

        if set.entries.is_empty() {
            set.shortest_key = 0;
        }
        Ok(set)
    }

    /// Regroup the patterns into length-keyed blocks, in source order.
    ///
    /// For any set produced by [`decompile`](Self::decompile) this returns
    /// the blocks it was decompiled from.
    pub fn recompile(&self) -> BTreeMap<usize, String> {
        let mut blocks: BTreeMap<usize, String> = BTreeMap::new();
        for pattern in &self.entries {
            blocks
                .entry(pattern.text.chars().count())
                .or_default()
                .push_str(&pattern.text);
        }
        blocks
    }

    /// Look up a pattern by key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Pattern> {
        self.index.get(key).map(|&i| &self.entries[i as usize])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, pattern)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pattern)> {
        self.index
            .iter()
            .map(|(k, &i)| (k.as_ref(), &self.entries[i as usize]))
    }

    /// Length of the shortest key actually present (0 when empty).
    pub fn shortest_key(&self) -> usize {
        self.shortest_key
    }

    /// Length of the longest key actually present (0 when empty).
    pub fn longest_key(&self) -> usize {
        self.longest_key
    }
}
