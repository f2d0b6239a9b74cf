//! Property tests for word and text hyphenation.

use hyph_engine::hyphenator::{break_pattern, hyphenate_word};
use hyph_engine::{Hyphenator, Settings};
use hyph_patterns::PatternSource;
use proptest::prelude::*;

fn hyphenator() -> Hyphenator {
    let h = Hyphenator::from_settings(&Settings::default(), None).unwrap();
    let source = PatternSource::from_json(include_str!("fixtures/en-test.json")).unwrap();
    h.registry().insert("en", source).unwrap();
    h
}

/// Words built from the letters the fixture patterns mention, so breaks
/// actually occur.
fn word() -> impl Strategy<Value = String> {
    "[hyphenatiosc]{1,24}"
}

/// Runs of words, hyphens, apostrophes and spaces.
fn run() -> impl Strategy<Value = String> {
    "[hyphenatiosc' -]{0,64}"
}

proptest! {
    #[test]
    fn removal_undoes_hyphenation(text in run()) {
        // A hyphenated spelling of an exception takes the exception's breaks
        // and drops its own hyphens.
        prop_assume!(!text.split(' ').any(|chunk| {
            chunk.contains('-') && chunk.replace(['-', '\''], "").contains("associate")
        }));
        let h = hyphenator();
        let hyphenated = h.hyphenate_text("en", &text).unwrap();
        prop_assert_eq!(h.remove(&hyphenated), text);
    }

    #[test]
    fn hyphenating_twice_changes_nothing(text in run()) {
        let h = hyphenator();
        let once = h.hyphenate_text("en", &text).unwrap();
        let twice = h.hyphenate_text("en", &once).unwrap();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn breaks_respect_minimum_margins(w in word()) {
        let h = hyphenator();
        let table = h.registry().table("en").unwrap();
        let pattern = break_pattern(&table, &w);
        prop_assert_eq!(pattern.chars().count(), w.chars().count());

        let hyphenated = hyphenate_word(&table, &h.markers(), &w);
        let pieces: Vec<&str> = hyphenated.split('\u{AD}').collect();
        if pieces.len() > 1 {
            prop_assert!(pieces[0].chars().count() >= table.left_min());
            prop_assert!(pieces[pieces.len() - 1].chars().count() >= table.right_min());
        }
        prop_assert_eq!(pieces.concat(), w);
    }
}
