// Engine-level errors.

use hyph_patterns::StoreError;

/// Error type for hyphenation passes and engine construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HyphError {
    /// A pattern table could not be obtained.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An element has no language of its own, none inherited, and there is
    /// no document or default language.
    #[error("no language for element")]
    MissingLanguage,

    /// The pass was cancelled through its cancellation flag.
    #[error("hyphenation pass cancelled")]
    Cancelled,

    /// Settings failed to parse or validate.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl From<serde_json::Error> for HyphError {
    fn from(err: serde_json::Error) -> Self {
        HyphError::InvalidSettings(err.to_string())
    }
}
