// Prepared per-language pattern table.
//
// Preparation decompiles the pattern blocks, merges the exception lists and
// compiles the token matcher. A prepared table is read-only apart from its
// result cache.

use std::sync::Arc;

use hashbrown::HashMap;
use hyph_core::character::lookup_form;
use hyph_core::language::LanguageTag;
use hyph_core::markers::Markers;
use parking_lot::Mutex;

use crate::PatternError;
use crate::exceptions::Exceptions;
use crate::format::PatternSource;
use crate::matcher::WordMatcher;
use crate::patterns::PatternSet;

/// Default minimum length of a word the matcher will tokenize.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 6;

/// Options fixed for every table a registry prepares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Marker characters inserted by the engine.
    pub markers: Markers,
    /// Minimum word length for tokenization and minimum text-run length.
    pub min_word_length: usize,
    /// Whether tables keep a per-word result cache.
    pub enable_cache: bool,
    /// Global minimum for `leftmin`; raises but never lowers a table's value.
    pub left_min: Option<usize>,
    /// Global minimum for `rightmin`; raises but never lowers a table's value.
    pub right_min: Option<usize>,
    /// Exception lists applied to every language, after the language's own.
    pub global_exceptions: Vec<String>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            enable_cache: true,
            left_min: None,
            right_min: None,
            global_exceptions: Vec::new(),
        }
    }
}

/// A prepared, queryable pattern table for one language.
#[derive(Debug)]
pub struct PatternTable {
    language: LanguageTag,
    left_min: usize,
    right_min: usize,
    shortest_pattern: usize,
    longest_pattern: usize,
    special_chars: String,
    substitutions: HashMap<char, char>,
    patterns: Arc<PatternSet>,
    /// The pattern file's own exception list, kept for rebuilds.
    file_exceptions: Option<String>,
    exceptions: Exceptions,
    matcher: Arc<WordMatcher>,
    cache: Option<Mutex<HashMap<String, String>>>,
}

impl PatternTable {
    /// Prepare a table from raw pattern data.
    ///
    /// `extra_exceptions` are merged after the file's own exception list, in
    /// the order given; the first entry for a word wins.
    pub fn prepare<'a>(
        language: LanguageTag,
        source: &PatternSource,
        extra_exceptions: impl IntoIterator<Item = &'a str>,
        options: &StoreOptions,
    ) -> Result<Self, PatternError> {
        source.validate()?;

        let patterns = PatternSet::decompile(&source.patterns)?;
        if !patterns.is_empty()
            && (patterns.shortest_key() < source.shortest_pattern
                || patterns.longest_key() > source.longest_pattern)
        {
            return Err(PatternError::InvalidParameter {
                name: "shortestPattern/longestPattern",
                reason: format!(
                    "declared {}..={} but keys span {}..={}",
                    source.shortest_pattern,
                    source.longest_pattern,
                    patterns.shortest_key(),
                    patterns.longest_key()
                ),
            });
        }

        let special_chars = source.decoded_special_chars()?;
        let substitutions = source.substitutions()?.into_iter().collect();
        let file_exceptions = source.exceptions.clone();
        let extra: Vec<&str> = extra_exceptions.into_iter().collect();
        let exceptions = Exceptions::merge(
            file_exceptions
                .iter()
                .map(String::as_str)
                .chain(extra.iter().copied()),
        )?;
        let matcher =
            WordMatcher::new(&special_chars, &options.markers, options.min_word_length)?;

        log::debug!(
            "prepared {language}: {} patterns, {} exceptions",
            patterns.len(),
            exceptions.len()
        );

        Ok(Self {
            left_min: source.left_min.max(options.left_min.unwrap_or(0)),
            right_min: source.right_min.max(options.right_min.unwrap_or(0)),
            shortest_pattern: source.shortest_pattern,
            longest_pattern: source.longest_pattern,
            language,
            special_chars,
            substitutions,
            patterns: Arc::new(patterns),
            file_exceptions,
            exceptions,
            matcher: Arc::new(matcher),
            cache: options.enable_cache.then(Mutex::default),
        })
    }

    /// A copy of this table with its exceptions rebuilt from `extra_exceptions`
    /// (merged after the file's own list) and an empty cache.
    pub fn with_exceptions<'a>(
        &self,
        extra_exceptions: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, PatternError> {
        let extra: Vec<&str> = extra_exceptions.into_iter().collect();
        let exceptions = Exceptions::merge(
            self.file_exceptions
                .iter()
                .map(String::as_str)
                .chain(extra.iter().copied()),
        )?;
        Ok(Self {
            language: self.language.clone(),
            left_min: self.left_min,
            right_min: self.right_min,
            shortest_pattern: self.shortest_pattern,
            longest_pattern: self.longest_pattern,
            special_chars: self.special_chars.clone(),
            substitutions: self.substitutions.clone(),
            patterns: Arc::clone(&self.patterns),
            file_exceptions: self.file_exceptions.clone(),
            exceptions,
            matcher: Arc::clone(&self.matcher),
            cache: self.cache.as_ref().map(|_| Mutex::default()),
        })
    }

    pub fn language(&self) -> &LanguageTag {
        &self.language
    }

    pub fn left_min(&self) -> usize {
        self.left_min
    }

    pub fn right_min(&self) -> usize {
        self.right_min
    }

    pub fn shortest_pattern(&self) -> usize {
        self.shortest_pattern
    }

    pub fn longest_pattern(&self) -> usize {
        self.longest_pattern
    }

    pub fn special_chars(&self) -> &str {
        &self.special_chars
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn exceptions(&self) -> &Exceptions {
        &self.exceptions
    }

    pub fn matcher(&self) -> &WordMatcher {
        &self.matcher
    }

    /// The hyphenated spelling of an exception word.
    pub fn exception(&self, word: &str) -> Option<&str> {
        self.exceptions.get(word)
    }

    /// The form of `word` patterns are matched against: lowercased per
    /// character, apostrophes normalized, then language substitutions. Always
    /// the same length in characters as `word`.
    pub fn lookup_form(&self, word: &str) -> Vec<char> {
        word.chars()
            .map(|c| {
                let c = lookup_form(c);
                self.substitutions.get(&c).copied().unwrap_or(c)
            })
            .collect()
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// A previously stored result for `word`.
    pub fn cached(&self, word: &str) -> Option<String> {
        self.cache.as_ref()?.lock().get(word).cloned()
    }

    /// Store a result for `word` unless one is already present.
    pub fn store_cached(&self, word: &str, hyphenated: &str) {
        if let Some(cache) = &self.cache {
            cache
                .lock()
                .entry_ref(word)
                .or_insert_with(|| hyphenated.to_string());
        }
    }

    /// Number of cached words.
    pub fn cache_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.lock().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> PatternSource {
        PatternSource::from_json(
            r#"{
                "leftmin": 2, "rightmin": 3,
                "shortestPattern": 2, "longestPattern": 5,
                "specialChars": "",
                "patterns": { "3": "h1yi1o", "4": "he2nn2at", "5": "hy3pha1tio", "6": "hen5at" },
                "exceptions": "ta-ble",
                "charSubstitution": { "é": "e" }
            }"#,
        )
        .unwrap()
    }

    fn en() -> LanguageTag {
        LanguageTag::parse("en").unwrap()
    }

    #[test]
    fn prepare_builds_lookup() {
        let table = PatternTable::prepare(en(), &source(), [], &StoreOptions::default()).unwrap();
        assert_eq!(table.patterns().len(), 7);
        assert_eq!(table.patterns().get("henat").unwrap().text(), "hen5at");
        assert_eq!(table.exception("table"), Some("ta-ble"));
        assert_eq!(table.left_min(), 2);
        assert_eq!(table.right_min(), 3);
        assert!(table.cache_enabled());
    }

    #[test]
    fn file_exceptions_precede_extra_lists() {
        let table = PatternTable::prepare(
            en(),
            &source(),
            ["tab-le, pro-ject", "proj-ect, as-so-ciate"],
            &StoreOptions::default(),
        )
        .unwrap();
        assert_eq!(table.exception("table"), Some("ta-ble"));
        assert_eq!(table.exception("project"), Some("pro-ject"));
        assert_eq!(table.exception("associate"), Some("as-so-ciate"));
    }

    #[test]
    fn global_minimums_only_raise() {
        let options = StoreOptions {
            left_min: Some(3),
            right_min: Some(1),
            ..StoreOptions::default()
        };
        let table = PatternTable::prepare(en(), &source(), [], &options).unwrap();
        assert_eq!(table.left_min(), 3);
        assert_eq!(table.right_min(), 3);
    }

    #[test]
    fn undeclared_key_lengths_are_rejected() {
        let mut src = source();
        src.longest_pattern = 4;
        let err = PatternTable::prepare(en(), &src, [], &StoreOptions::default()).unwrap_err();
        assert!(matches!(err, PatternError::InvalidParameter { .. }));
    }

    #[test]
    fn malformed_exceptions_fail_preparation() {
        let err = PatternTable::prepare(en(), &source(), ["-bad"], &StoreOptions::default())
            .unwrap_err();
        assert!(matches!(err, PatternError::MalformedException { .. }));
    }

    #[test]
    fn lookup_form_lowercases_and_substitutes() {
        let table = PatternTable::prepare(en(), &source(), [], &StoreOptions::default()).unwrap();
        let form: String = table.lookup_form("Don't Café").into_iter().collect();
        assert_eq!(form, "don\u{2019}t cafe");
    }

    #[test]
    fn cache_insert_if_absent() {
        let table = PatternTable::prepare(en(), &source(), [], &StoreOptions::default()).unwrap();
        assert_eq!(table.cached("word"), None);
        table.store_cached("word", "first");
        table.store_cached("word", "second");
        assert_eq!(table.cached("word").as_deref(), Some("first"));
        assert_eq!(table.cache_len(), 1);
    }

    #[test]
    fn disabled_cache_stores_nothing() {
        let options = StoreOptions {
            enable_cache: false,
            ..StoreOptions::default()
        };
        let table = PatternTable::prepare(en(), &source(), [], &options).unwrap();
        table.store_cached("word", "w");
        assert_eq!(table.cached("word"), None);
        assert_eq!(table.cache_len(), 0);
    }

    #[test]
    fn with_exceptions_resets_cache() {
        let table = PatternTable::prepare(en(), &source(), [], &StoreOptions::default()).unwrap();
        table.store_cached("project", "project");
        let rebuilt = table.with_exceptions(["pro-ject"]).unwrap();
        assert_eq!(rebuilt.cache_len(), 0);
        assert_eq!(rebuilt.exception("project"), Some("pro-ject"));
        assert_eq!(rebuilt.exception("table"), Some("ta-ble"));
        assert_eq!(rebuilt.patterns().len(), table.patterns().len());
    }

    #[test]
    fn extra_lists_need_not_outlive_the_table() {
        let table = {
            let lists = vec![String::from("pro-ject")];
            PatternTable::prepare(
                en(),
                &source(),
                lists.iter().map(String::as_str),
                &StoreOptions::default(),
            )
            .unwrap()
        };
        assert_eq!(table.exception("project"), Some("pro-ject"));

        let rebuilt = {
            let lists = vec![String::from("as-so-ciate")];
            table.with_exceptions(lists.iter().map(String::as_str)).unwrap()
        };
        assert_eq!(rebuilt.exception("associate"), Some("as-so-ciate"));
        assert_eq!(rebuilt.exception("table"), Some("ta-ble"));
    }
}
