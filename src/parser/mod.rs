//! Snippet recognition
//!
//! This module turns raw snippet text into abstract operations:
//! - [`language`]: the closed [`Language`], [`DsaKind`] and [`OpKind`] enums
//! - [`detector`]: source text → [`DsaKind`]
//! - [`lexer`]: single-line call-site scanner
//! - [`grammar`]: per-language pattern tables
//! - [`extractor`]: source text + language + kind → [`Operation`] list
//!
//! # Scope
//!
//! Recognition is shape-based, not a parser for any real language. Only a
//! fixed set of method-call shapes is understood; control flow, expressions and
//! user-defined types are ignored. At most one operation is taken from a line.

pub mod detector;
pub mod extractor;
pub mod grammar;
pub mod language;
pub mod lexer;

pub use detector::detect;
pub use extractor::{extract, Operation};
pub use language::{DsaKind, Language, OpKind};
