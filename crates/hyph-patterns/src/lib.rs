//! Per-language hyphenation pattern store.
//!
//! Raw pattern files are parsed into a [`PatternSource`], prepared once into an
//! immutable [`PatternTable`], and shared through a [`PatternStoreRegistry`].
//!
//! # Architecture
//!
//! - [`format`] -- Pattern file record and its JSON form
//! - [`patterns`] -- Decompilation of length-grouped pattern blocks
//! - [`exceptions`] -- Exception list parsing and merging
//! - [`matcher`] -- Word/URL/email token matcher
//! - [`table`] -- Prepared per-language table with result cache
//! - [`loader`] -- Injected data sources (directory, memory)
//! - [`registry`] -- Process-wide registry keyed by language

pub mod exceptions;
pub mod format;
pub mod loader;
pub mod matcher;
pub mod patterns;
pub mod registry;
pub mod table;

pub use format::PatternSource;
pub use loader::{DirectoryLoader, MemoryLoader, PatternLoader};
#[cfg(feature = "async")]
pub use loader::AsyncPatternLoader;
pub use registry::{LanguageStatus, PatternStoreRegistry, StoreError, WaitPolicy};
pub use table::{PatternTable, StoreOptions};

/// Error type for pattern data that cannot be read or does not conform to
/// the pattern file format.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("failed to read pattern data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid pattern file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed pattern block of length {length}: {reason}")]
    MalformedPattern { length: usize, reason: String },
    #[error("malformed exception {entry:?}: {reason}")]
    MalformedException { entry: String, reason: String },
    #[error("invalid table parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("failed to compile word matcher: {0}")]
    Matcher(#[from] regex::Error),
    #[error("no pattern data for language {0:?}")]
    NotFound(String),
}
