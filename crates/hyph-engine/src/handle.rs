// Hyphenator: top-level integration point.
//
// Owns a shared pattern registry and the engine configuration, and exposes
// word, text and document operations by language code. Document passes go
// through a `DocumentSession` borrowed from the handle.

use std::sync::Arc;

use hyph_core::markers::Markers;
use hyph_patterns::{PatternLoader, PatternStoreRegistry};

use crate::config::{Callbacks, EngineConfig, Settings};
use crate::document::{Document, DocumentSession, PassReport};
use crate::error::HyphError;
use crate::hyphenator::{hyphenate_url, hyphenate_word};
use crate::text::{hyphenate_run, remove_markers};

/// Shared hyphenation engine.
#[derive(Debug, Clone)]
pub struct Hyphenator {
    registry: Arc<PatternStoreRegistry>,
    config: EngineConfig,
}

impl Hyphenator {
    pub fn new(registry: Arc<PatternStoreRegistry>, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Build a registry and engine from validated settings. The optional
    /// loader supplies languages that are not inserted up front.
    pub fn from_settings(
        settings: &Settings,
        loader: Option<Arc<dyn PatternLoader>>,
    ) -> Result<Self, HyphError> {
        settings.validate()?;
        let options = settings.store_options();
        let registry = match loader {
            Some(loader) => PatternStoreRegistry::with_loader(options, loader),
            None => PatternStoreRegistry::new(options),
        };
        Ok(Self::new(Arc::new(registry), settings.engine_config()))
    }

    /// Replace the caller hooks.
    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.config.callbacks = callbacks;
        self
    }

    pub fn registry(&self) -> &Arc<PatternStoreRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn markers(&self) -> Markers {
        self.registry.options().markers
    }

    /// Hyphenate one word with the table for `language`.
    pub fn hyphenate_word(&self, language: &str, word: &str) -> Result<String, HyphError> {
        let table = self.registry.table(language)?;
        Ok(hyphenate_word(&table, &self.markers(), word))
    }

    /// Hyphenate every word and URL of `text` with the table for `language`.
    pub fn hyphenate_text(&self, language: &str, text: &str) -> Result<String, HyphError> {
        let table = self.registry.table(language)?;
        let outcome = hyphenate_run(
            &table,
            &self.markers(),
            self.config.orphan_control,
            &self.config.callbacks,
            text,
        );
        Ok(outcome.text)
    }

    pub fn hyphenate_url(&self, url: &str) -> String {
        hyphenate_url(&self.markers(), url)
    }

    /// Strip both markers from `text`.
    pub fn remove(&self, text: &str) -> String {
        remove_markers(&self.markers(), text)
    }

    /// A session for repeated passes over one document.
    pub fn session<D: Document>(&self) -> DocumentSession<'_, D> {
        DocumentSession::new(self)
    }

    /// One apply pass over `doc`.
    pub fn apply<D: Document>(&self, doc: &mut D) -> Result<PassReport, HyphError> {
        self.session().apply(doc)
    }

    /// One remove pass over `doc`.
    pub fn remove_document<D: Document>(&self, doc: &mut D) -> Result<PassReport, HyphError> {
        self.session().remove(doc)
    }
}

#[cfg(test)]
mod tests {
    use hyph_patterns::{MemoryLoader, PatternSource, StoreError};

    use super::*;

    fn source() -> PatternSource {
        PatternSource::from_json(
            r#"{
                "leftmin": 2, "rightmin": 3,
                "shortestPattern": 2, "longestPattern": 5,
                "patterns": { "3": "h1yi1o", "4": "he2nn2at", "5": "hy3pha1tio", "6": "hen5at" }
            }"#,
        )
        .unwrap()
    }

    fn hyphenator() -> Hyphenator {
        let loader = MemoryLoader::new().with("en", source());
        Hyphenator::from_settings(&Settings::default(), Some(Arc::new(loader))).unwrap()
    }

    #[test]
    fn word_and_text_by_language() {
        let h = hyphenator();
        assert_eq!(
            h.hyphenate_word("en-US", "hyphenation").unwrap(),
            "hy\u{AD}phen\u{AD}a\u{AD}tion"
        );
        assert_eq!(
            h.hyphenate_text("en", "on hyphenation").unwrap(),
            "on hy\u{AD}phen\u{AD}a\u{AD}tion"
        );
    }

    #[test]
    fn unsupported_language_is_an_error() {
        let err = hyphenator().hyphenate_word("fr", "hyphenation").unwrap_err();
        assert!(matches!(
            err,
            HyphError::Store(StoreError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn remove_strips_markers() {
        let h = hyphenator();
        let text = h.hyphenate_text("en", "hyphenation at example.com").unwrap();
        assert_eq!(h.remove(&text), "hyphenation at example.com");
    }

    #[test]
    fn custom_markers_flow_from_settings() {
        let settings = Settings {
            break_marker: '|',
            ..Settings::default()
        };
        let h = Hyphenator::from_settings(&settings, None).unwrap();
        h.registry().insert("en", source()).unwrap();
        assert_eq!(h.hyphenate_word("en", "hyphenation").unwrap(), "hy|phen|a|tion");
        assert_eq!(h.remove("hy|phen|a|tion"), "hyphenation");
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = Settings {
            min_word_length: 0,
            ..Settings::default()
        };
        assert!(matches!(
            Hyphenator::from_settings(&settings, None),
            Err(HyphError::InvalidSettings(_))
        ));
    }
}
