// WASM bindings for the hyph hyphenation engine.
//
// Provides a `WasmHyphenator` class exported via wasm-bindgen that wraps a
// `Hyphenator` with its own pattern registry. Pattern data is handed over as
// JSON text by the host page, which does its own fetching. Structured return
// values are serialized with serde-wasm-bindgen.
//
// Usage from JavaScript:
//
//   const hyph = new WasmHyphenator({ min_word_length: 5 });
//   hyph.addLanguage("en", await (await fetch("/patterns/en.json")).text());
//   hyph.hyphenateWord("en", "hyphenation");   // => "hy\u00ADphen\u00ADa\u00ADtion"
//   hyph.hyphenateText("en", "on hyphenation"); // => "on hy\u00ADphen..."
//   hyph.breakPattern("en", "hyphenation");     // => "  -   --   "
//   hyph.tokens("en", "see example.com");       // => [{ kind: "Url", ... }]
//   hyph.remove(text);                          // strips both markers

use serde::Serialize;
use wasm_bindgen::prelude::*;

use hyph_core::token::TokenKind;
use hyph_engine::hyphenator::break_pattern;
use hyph_engine::{Hyphenator, Settings};
use hyph_patterns::{LanguageStatus, PatternSource};

// ============================================================================
// DTOs
// ============================================================================

/// Serializable representation of a matched token.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsToken {
    kind: TokenKind,
    text: String,
    start: usize,
    end: usize,
}

fn to_js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn status_name(status: Option<LanguageStatus>) -> &'static str {
    match status {
        None => "unknown",
        Some(LanguageStatus::Raw) => "raw",
        Some(LanguageStatus::Loading) => "loading",
        Some(LanguageStatus::Ready) => "ready",
        Some(LanguageStatus::Failed) => "failed",
    }
}

// ============================================================================
// WasmHyphenator
// ============================================================================

/// Pattern-based hyphenator for WebAssembly.
#[wasm_bindgen]
pub struct WasmHyphenator {
    inner: Hyphenator,
}

#[wasm_bindgen]
impl WasmHyphenator {
    /// Create a hyphenator. `settings` is an optional object with the same
    /// keys as the JSON settings file; unknown keys are rejected.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<WasmHyphenator, JsError> {
        let settings: Settings = if settings.is_undefined() || settings.is_null() {
            Settings::default()
        } else {
            serde_wasm_bindgen::from_value(settings).map_err(to_js_error)?
        };
        let inner = Hyphenator::from_settings(&settings, None).map_err(to_js_error)?;
        Ok(WasmHyphenator { inner })
    }

    /// Register pattern data for `language` from the text of a pattern file.
    /// The table is prepared on first use.
    #[wasm_bindgen(js_name = "addLanguage")]
    pub fn add_language(&self, language: &str, json: &str) -> Result<(), JsError> {
        let source = PatternSource::from_json(json).map_err(to_js_error)?;
        self.inner
            .registry()
            .insert(language, source)
            .map_err(to_js_error)?;
        Ok(())
    }

    /// Add comma-separated hyphenated exceptions for one language.
    #[wasm_bindgen(js_name = "addExceptions")]
    pub fn add_exceptions(&self, language: &str, list: &str) -> Result<(), JsError> {
        self.inner
            .registry()
            .add_exceptions(language, list)
            .map_err(to_js_error)
    }

    /// Add comma-separated hyphenated exceptions for every language.
    #[wasm_bindgen(js_name = "addGlobalExceptions")]
    pub fn add_global_exceptions(&self, list: &str) -> Result<(), JsError> {
        self.inner
            .registry()
            .add_global_exceptions(list)
            .map_err(to_js_error)
    }

    /// Registered languages, sorted.
    pub fn languages(&self) -> Vec<String> {
        self.inner
            .registry()
            .languages()
            .into_iter()
            .map(|tag| tag.as_str().to_string())
            .collect()
    }

    /// `"unknown"`, `"raw"`, `"loading"`, `"ready"` or `"failed"`.
    pub fn status(&self, language: &str) -> String {
        status_name(self.inner.registry().state(language)).to_string()
    }

    #[wasm_bindgen(js_name = "hyphenateWord")]
    pub fn hyphenate_word(&self, language: &str, word: &str) -> Result<String, JsError> {
        self.inner
            .hyphenate_word(language, word)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = "hyphenateText")]
    pub fn hyphenate_text(&self, language: &str, text: &str) -> Result<String, JsError> {
        self.inner
            .hyphenate_text(language, text)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = "hyphenateUrl")]
    pub fn hyphenate_url(&self, url: &str) -> String {
        self.inner.hyphenate_url(url)
    }

    /// Break pattern of `word`: one character per input character, `'-'`
    /// where a break may precede it and `' '` elsewhere.
    #[wasm_bindgen(js_name = "breakPattern")]
    pub fn break_pattern(&self, language: &str, word: &str) -> Result<String, JsError> {
        let table = self.inner.registry().table(language).map_err(to_js_error)?;
        Ok(break_pattern(&table, word))
    }

    /// Tokens the language's matcher finds in `text`, with byte offsets.
    pub fn tokens(&self, language: &str, text: &str) -> Result<JsValue, JsError> {
        let table = self.inner.registry().table(language).map_err(to_js_error)?;
        let tokens: Vec<JsToken> = table
            .matcher()
            .tokens(text)
            .map(|t| JsToken {
                kind: t.kind,
                text: t.text.to_string(),
                start: t.start,
                end: t.end,
            })
            .collect();
        serde_wasm_bindgen::to_value(&tokens).map_err(to_js_error)
    }

    /// Strip both markers from `text`.
    pub fn remove(&self, text: &str) -> String {
        self.inner.remove(text)
    }
}
