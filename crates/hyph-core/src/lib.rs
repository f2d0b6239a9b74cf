//! Shared types for the hyph hyphenation engine.
//!
//! - [`markers`] -- Break marker characters and marker stripping
//! - [`character`] -- Character helpers used by pattern matching
//! - [`token`] -- Token kinds produced by the word matcher
//! - [`language`] -- Language code normalization and fallback

pub mod character;
pub mod language;
pub mod markers;
pub mod token;
