// Pattern data sources.
//
// The registry never touches the filesystem or network itself. It asks a
// loader for the raw `PatternSource` of a language code and prepares the
// result.

use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use crate::PatternError;
use crate::format::PatternSource;

/// Synchronous source of raw pattern data.
pub trait PatternLoader: Send + Sync {
    /// Whether data for `language` (a normalized code) can be loaded.
    fn supports(&self, language: &str) -> bool;

    /// Load the raw pattern data for `language`.
    fn load(&self, language: &str) -> Result<PatternSource, PatternError>;
}

/// Asynchronous source of raw pattern data.
#[cfg(feature = "async")]
pub trait AsyncPatternLoader: Send + Sync + 'static {
    /// Whether data for `language` (a normalized code) can be loaded.
    fn supports(&self, language: &str) -> bool;

    /// Load the raw pattern data for `language`.
    fn load(
        &self,
        language: &str,
    ) -> impl Future<Output = Result<PatternSource, PatternError>> + Send;
}

/// Loads `<root>/<language>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the pattern file for `language`.
    pub fn path_for(&self, language: &str) -> PathBuf {
        self.root.join(format!("{language}.json"))
    }

    /// Language codes of every `*.json` file directly under the root, sorted.
    pub fn available(&self) -> Result<Vec<String>, PatternError> {
        let mut languages = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                languages.push(stem.to_string());
            }
        }
        languages.sort();
        Ok(languages)
    }

    fn not_found(language: &str, err: std::io::Error) -> PatternError {
        if err.kind() == std::io::ErrorKind::NotFound {
            PatternError::NotFound(language.to_string())
        } else {
            PatternError::Io(err)
        }
    }
}

impl PatternLoader for DirectoryLoader {
    fn supports(&self, language: &str) -> bool {
        self.path_for(language).is_file()
    }

    fn load(&self, language: &str) -> Result<PatternSource, PatternError> {
        let path = self.path_for(language);
        log::debug!("loading patterns from {}", path.display());
        let text =
            std::fs::read_to_string(&path).map_err(|e| Self::not_found(language, e))?;
        PatternSource::from_json(&text)
    }
}

#[cfg(feature = "async")]
impl AsyncPatternLoader for DirectoryLoader {
    fn supports(&self, language: &str) -> bool {
        self.path_for(language).is_file()
    }

    async fn load(&self, language: &str) -> Result<PatternSource, PatternError> {
        let path = self.path_for(language);
        log::debug!("loading patterns from {}", path.display());
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Self::not_found(language, e))?;
        PatternSource::from_json(&text)
    }
}

/// Pre-supplied pattern data keyed by language code.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    sources: HashMap<String, PatternSource>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add data for `language`, replacing any earlier entry.
    pub fn with(mut self, language: &str, source: PatternSource) -> Self {
        self.insert(language, source);
        self
    }

    pub fn insert(&mut self, language: &str, source: PatternSource) {
        self.sources.insert(language.to_ascii_lowercase(), source);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn get(&self, language: &str) -> Result<PatternSource, PatternError> {
        self.sources
            .get(language)
            .cloned()
            .ok_or_else(|| PatternError::NotFound(language.to_string()))
    }
}

impl PatternLoader for MemoryLoader {
    fn supports(&self, language: &str) -> bool {
        self.sources.contains_key(language)
    }

    fn load(&self, language: &str) -> Result<PatternSource, PatternError> {
        self.get(language)
    }
}

#[cfg(feature = "async")]
impl AsyncPatternLoader for MemoryLoader {
    fn supports(&self, language: &str) -> bool {
        self.sources.contains_key(language)
    }

    async fn load(&self, language: &str) -> Result<PatternSource, PatternError> {
        self.get(language)
    }
}
