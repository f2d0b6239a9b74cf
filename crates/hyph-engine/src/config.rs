// Engine configuration.
//
// `Settings` is the serializable surface (JSON, unknown keys rejected). It
// splits into the `StoreOptions` fixed for every pattern table and the
// `EngineConfig` used by text and document passes. Callbacks live only on
// `EngineConfig` since they cannot be deserialized.

use std::sync::Arc;
use std::time::Duration;

use hyph_core::language::LanguageTag;
use hyph_core::markers::{Markers, SOFT_HYPHEN, ZERO_WIDTH_SPACE};
use hyph_patterns::table::DEFAULT_MIN_WORD_LENGTH;
use hyph_patterns::{StoreOptions, WaitPolicy};
use serde::{Deserialize, Serialize};

use crate::document::PassReport;
use crate::error::HyphError;

/// Visibility of a selected subtree while it is being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntermediateState {
    /// Hidden during processing, previous visibility restored afterwards.
    #[default]
    Hidden,
    /// Left as is.
    Visible,
}

/// Treatment of the last word of each text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanControl {
    /// The last word is hyphenated like any other.
    #[default]
    Allow,
    /// The last word is left unbroken.
    ForbidLastWord,
    /// The last word is left unbroken and the spaces before it become
    /// no-break spaces.
    NonBreakingLast,
}

/// Serializable engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub break_marker: char,
    pub url_marker: char,
    pub min_word_length: usize,
    pub enable_cache: bool,
    /// Load missing languages asynchronously instead of requiring every
    /// table up front.
    pub remote_loading: bool,
    pub intermediate_state: IntermediateState,
    pub default_language: Option<String>,
    pub hyphenate_class: String,
    pub dont_hyphenate_class: String,
    pub left_min: Option<usize>,
    pub right_min: Option<usize>,
    pub orphan_control: OrphanControl,
    pub wait_interval_ms: u64,
    pub wait_max_attempts: u32,
    pub global_exceptions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            break_marker: SOFT_HYPHEN,
            url_marker: ZERO_WIDTH_SPACE,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            enable_cache: true,
            remote_loading: true,
            intermediate_state: IntermediateState::Hidden,
            default_language: None,
            hyphenate_class: "hyphenate".to_string(),
            dont_hyphenate_class: "donthyphenate".to_string(),
            left_min: None,
            right_min: None,
            orphan_control: OrphanControl::Allow,
            wait_interval_ms: 10,
            wait_max_attempts: 1000,
            global_exceptions: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON.
    pub fn from_json(text: &str) -> Result<Self, HyphError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the combinations serde cannot.
    pub fn validate(&self) -> Result<(), HyphError> {
        let invalid = |msg: String| Err(HyphError::InvalidSettings(msg));
        if self.break_marker == self.url_marker {
            return invalid("break_marker and url_marker must differ".to_string());
        }
        let markers = [
            ("break_marker", self.break_marker),
            ("url_marker", self.url_marker),
        ];
        for (name, c) in markers {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                return invalid(format!("{name} {c:?} would be mistaken for word text"));
            }
        }
        if self.min_word_length == 0 {
            return invalid("min_word_length must be at least 1".to_string());
        }
        if self.hyphenate_class.trim().is_empty()
            || self.dont_hyphenate_class.trim().is_empty()
        {
            return invalid("class names must not be empty".to_string());
        }
        if self.hyphenate_class == self.dont_hyphenate_class {
            return invalid("hyphenate_class and dont_hyphenate_class must differ".to_string());
        }
        if self.wait_max_attempts == 0 {
            return invalid("wait_max_attempts must be at least 1".to_string());
        }
        if let Some(language) = &self.default_language {
            LanguageTag::parse(language)
                .map_err(|e| HyphError::InvalidSettings(format!("default_language: {e}")))?;
        }
        Ok(())
    }

    pub fn markers(&self) -> Markers {
        Markers {
            break_marker: self.break_marker,
            url_marker: self.url_marker,
        }
    }

    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy {
            interval: Duration::from_millis(self.wait_interval_ms),
            max_attempts: self.wait_max_attempts,
        }
    }

    /// Options for the pattern registry.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            markers: self.markers(),
            min_word_length: self.min_word_length,
            enable_cache: self.enable_cache,
            left_min: self.left_min,
            right_min: self.right_min,
            global_exceptions: self.global_exceptions.clone(),
        }
    }

    /// Options for text and document passes, without callbacks.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            remote_loading: self.remote_loading,
            intermediate_state: self.intermediate_state,
            orphan_control: self.orphan_control,
            default_language: self.default_language.clone(),
            hyphenate_class: self.hyphenate_class.clone(),
            dont_hyphenate_class: self.dont_hyphenate_class.clone(),
            wait_policy: self.wait_policy(),
            callbacks: Callbacks::default(),
        }
    }
}

/// Called once at the end of every completed document pass.
pub type CompleteFn = Arc<dyn Fn(&PassReport) + Send + Sync>;
/// Called for every recoverable error met during a pass.
pub type ErrorFn = Arc<dyn Fn(&HyphError) + Send + Sync>;
/// Called with a word (or its hyphenated form) and the table's language.
pub type WordHook = Arc<dyn Fn(&str, &LanguageTag) -> String + Send + Sync>;

/// Optional caller hooks.
#[derive(Clone, Default)]
pub struct Callbacks {
    pub on_complete: Option<CompleteFn>,
    pub on_error: Option<ErrorFn>,
    /// Rewrites each word before it is hyphenated.
    pub before_word: Option<WordHook>,
    /// Rewrites each hyphenated word.
    pub after_word: Option<WordHook>,
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_complete", &self.on_complete.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("before_word", &self.before_word.is_some())
            .field("after_word", &self.after_word.is_some())
            .finish()
    }
}

impl Callbacks {
    pub(crate) fn complete(&self, report: &PassReport) {
        if let Some(f) = &self.on_complete {
            f(report);
        }
    }

    pub(crate) fn error(&self, err: &HyphError) {
        if let Some(f) = &self.on_error {
            f(err);
        }
    }
}

/// Options for text and document passes.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub remote_loading: bool,
    pub intermediate_state: IntermediateState,
    pub orphan_control: OrphanControl,
    pub default_language: Option<String>,
    pub hyphenate_class: String,
    pub dont_hyphenate_class: String,
    pub wait_policy: WaitPolicy,
    pub callbacks: Callbacks,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Settings::default().engine_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.break_marker, '\u{00AD}');
        assert_eq!(settings.url_marker, '\u{200B}');
        assert_eq!(settings.min_word_length, 6);
        assert!(settings.enable_cache);
        assert!(settings.remote_loading);
        assert_eq!(settings.intermediate_state, IntermediateState::Hidden);
        assert_eq!(settings.wait_policy(), WaitPolicy::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = Settings::from_json(
            r#"{ "min_word_length": 4, "orphan_control": "non_breaking_last", "intermediate_state": "visible" }"#,
        )
        .unwrap();
        assert_eq!(settings.min_word_length, 4);
        assert_eq!(settings.orphan_control, OrphanControl::NonBreakingLast);
        assert_eq!(settings.intermediate_state, IntermediateState::Visible);
        assert_eq!(settings.hyphenate_class, "hyphenate");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Settings::from_json(r#"{ "minWordLength": 4 }"#).unwrap_err();
        assert!(matches!(err, HyphError::InvalidSettings(_)));
    }

    #[test]
    fn markers_parse_from_strings() {
        let settings = Settings::from_json(r#"{ "break_marker": "|", "url_marker": "\u200C" }"#)
            .unwrap();
        assert_eq!(settings.markers().break_marker, '|');
        assert_eq!(settings.markers().url_marker, '\u{200C}');
    }

    #[test]
    fn invalid_combinations_are_rejected() {
        for json in [
            r#"{ "break_marker": "\u200B" }"#,
            r#"{ "break_marker": "x" }"#,
            r#"{ "min_word_length": 0 }"#,
            r#"{ "hyphenate_class": "" }"#,
            r#"{ "dont_hyphenate_class": "hyphenate" }"#,
            r#"{ "wait_max_attempts": 0 }"#,
            r#"{ "default_language": "en us" }"#,
        ] {
            assert!(Settings::from_json(json).is_err(), "{json}");
        }
    }

    #[test]
    fn store_options_carry_overrides() {
        let settings = Settings {
            left_min: Some(3),
            enable_cache: false,
            global_exceptions: vec!["pro-ject".to_string()],
            ..Settings::default()
        };
        let options = settings.store_options();
        assert_eq!(options.left_min, Some(3));
        assert_eq!(options.right_min, None);
        assert!(!options.enable_cache);
        assert_eq!(options.global_exceptions, vec!["pro-ject"]);
    }

    #[test]
    fn engine_config_mirrors_settings() {
        let settings = Settings {
            orphan_control: OrphanControl::ForbidLastWord,
            default_language: Some("de".to_string()),
            ..Settings::default()
        };
        let config = settings.engine_config();
        assert_eq!(config.orphan_control, OrphanControl::ForbidLastWord);
        assert_eq!(config.default_language.as_deref(), Some("de"));
        assert!(config.callbacks.on_complete.is_none());
    }
}
