//! Pattern-based hyphenation engine.
//!
//! Computes break points with Liang's algorithm over the tables of a
//! [`PatternStoreRegistry`](hyph_patterns::PatternStoreRegistry), inserts
//! break markers into words, text runs and document trees, and strips them
//! again.
//!
//! # Architecture
//!
//! - [`hyphenator`] -- Core break-point scan, word and URL hyphenation
//! - [`text`] -- Text-run tokenization, orphan control, marker removal
//! - [`document`] -- `Document` trait, apply/remove passes, arena tree
//! - [`config`] -- Serializable settings and engine configuration
//! - [`handle`] -- [`Hyphenator`], the top-level entry point
//!
//! # Example
//!
//! ```
//! use hyph_engine::{Hyphenator, Settings};
//! use hyph_patterns::PatternSource;
//!
//! let source = PatternSource::from_json(r#"{
//!     "leftmin": 2, "rightmin": 3, "shortestPattern": 2, "longestPattern": 5,
//!     "patterns": { "5": "hy3pha1tio", "6": "hen5at" }
//! }"#).unwrap();
//! let hyphenator = Hyphenator::from_settings(&Settings::default(), None).unwrap();
//! hyphenator.registry().insert("en", source).unwrap();
//!
//! let word = hyphenator.hyphenate_word("en", "hyphenation").unwrap();
//! assert_eq!(word, "hy\u{AD}phen\u{AD}a\u{AD}tion");
//! assert_eq!(hyphenator.remove(&word), "hyphenation");
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod handle;
pub mod hyphenator;
pub mod text;

pub use config::{Callbacks, EngineConfig, IntermediateState, OrphanControl, Settings};
pub use document::tree::{ElementTree, NodeId};
pub use document::{Document, DocumentSession, ElementState, PassKind, PassReport};
pub use error::HyphError;
pub use handle::Hyphenator;
