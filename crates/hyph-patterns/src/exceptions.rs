// Exception lists: explicit hyphenations that override the patterns.
//
// Lists are strings of comma+space separated words written with literal
// hyphens at the approved break points ("as-so-ciate, ta-ble"). Each word is
// keyed by its hyphen-free spelling.

use hashbrown::HashMap;

use crate::PatternError;

/// Separator between entries of an exception list.
pub const EXCEPTION_SEPARATOR: &str = ", ";

/// Split an exception list into its hyphenated entries.
///
/// Empty entries are skipped. An entry containing whitespace, digits, a
/// leading or trailing hyphen, or two consecutive hyphens is malformed.
pub fn parse_exception_list(list: &str) -> Result<Vec<&str>, PatternError> {
    let mut entries = Vec::new();
    for entry in list.split(EXCEPTION_SEPARATOR) {
        if entry.is_empty() {
            continue;
        }
        validate_entry(entry)?;
        entries.push(entry);
    }
    Ok(entries)
}

fn validate_entry(entry: &str) -> Result<(), PatternError> {
    let malformed = |reason: &str| PatternError::MalformedException {
        entry: entry.to_string(),
        reason: reason.to_string(),
    };
    if entry.chars().any(char::is_whitespace) {
        return Err(malformed("contains whitespace"));
    }
    if entry.chars().any(|c| c.is_ascii_digit()) {
        return Err(malformed("contains digits"));
    }
    if entry.starts_with('-') || entry.ends_with('-') {
        return Err(malformed("starts or ends with a hyphen"));
    }
    if entry.contains("--") {
        return Err(malformed("contains an empty segment"));
    }
    Ok(())
}

/// Merged exception lookup for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exceptions {
    /// Hyphen-free word -> hyphenated spelling.
    words: HashMap<String, String>,
}

impl Exceptions {
    /// Merge exception lists in order.
    ///
    /// The first list to mention a word wins; later entries for the same key
    /// are silently ignored. Callers pass language-specific lists before the
    /// global one, so a global entry never replaces a language entry, while a
    /// language entry that collides with an earlier language entry is dropped.
    pub fn merge<'a>(lists: impl IntoIterator<Item = &'a str>) -> Result<Self, PatternError> {
        let mut words = HashMap::new();
        for list in lists {
            for entry in parse_exception_list(list)? {
                let key = entry.replace('-', "");
                words.entry(key).or_insert_with(|| entry.to_string());
            }
        }
        Ok(Self { words })
    }

    /// The hyphenated spelling for `word`, if it is an exception.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.words.get(word).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_comma_space() {
        let entries = parse_exception_list("as-so-ciate, ta-ble, present").unwrap();
        assert_eq!(entries, vec!["as-so-ciate", "ta-ble", "present"]);
    }

    #[test]
    fn parse_skips_empty_list() {
        assert!(parse_exception_list("").unwrap().is_empty());
    }

    #[test]
    fn parse_requires_comma_space_separator() {
        // Without the space the list is a single entry.
        assert_eq!(
            parse_exception_list("ta-ble,pro-ject").unwrap(),
            vec!["ta-ble,pro-ject"]
        );
        assert!(parse_exception_list("ta-ble,  pro-ject").is_err());
    }

    #[test]
    fn parse_rejects_malformed_entries() {
        assert!(parse_exception_list("-ta-ble").is_err());
        assert!(parse_exception_list("ta-ble-").is_err());
        assert!(parse_exception_list("ta--ble").is_err());
        assert!(parse_exception_list("ta1-ble").is_err());
    }

    #[test]
    fn merge_keys_by_hyphen_free_form() {
        let ex = Exceptions::merge(["as-so-ciate, ta-ble"]).unwrap();
        assert_eq!(ex.get("associate"), Some("as-so-ciate"));
        assert_eq!(ex.get("table"), Some("ta-ble"));
        assert_eq!(ex.get("as-so-ciate"), None);
        assert_eq!(ex.len(), 2);
    }

    #[test]
    fn merge_first_write_wins() {
        // Documented precedence: the language list is merged first, so the
        // global entry for the same key is dropped.
        let ex = Exceptions::merge(["pro-ject", "proj-ect"]).unwrap();
        assert_eq!(ex.get("project"), Some("pro-ject"));
    }

    #[test]
    fn merge_within_one_list_keeps_first() {
        let ex = Exceptions::merge(["re-cord, rec-ord"]).unwrap();
        assert_eq!(ex.get("record"), Some("re-cord"));
        assert_eq!(ex.len(), 1);
    }

    #[test]
    fn merge_is_case_sensitive() {
        let ex = Exceptions::merge(["Ta-ble"]).unwrap();
        assert!(ex.contains("Table"));
        assert!(!ex.contains("table"));
    }
}
