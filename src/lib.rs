//! # Introduction
//!
//! dsatty animates data-structure operations found in short code snippets.
//! A snippet written in Java, Python, JavaScript or C++ is scanned for
//! method calls such as `push`, `offer` or `heappush`; each recognized call
//! is applied to an abstract model of the structure, and a snapshot is
//! captured after every operation. The snapshot timeline is then played
//! back, stepped and scrubbed through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → detect → extract → simulate → Timeline → playback → TUI
//! ```
//!
//! 1. [`parser`]: guesses the [`parser::DsaKind`] and extracts an ordered
//!    list of [`parser::Operation`]s using per-language call grammars.
//! 2. [`simulator`]: applies operations to a [`model::ModelState`] and
//!    records a [`snapshot::Snapshot`] after each one.
//! 3. [`playback`]: play / pause / step / seek / speed over the timeline,
//!    driven by generation-stamped ticks.
//! 4. [`session`]: ties the above together with an execution log.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported structures
//!
//! Stack, queue, array, linked list, hashmap, hashset and binary min-heap.
//! Not every language has a grammar for every structure; see
//! [`parser::grammar`].

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod playback;
pub mod session;
pub mod simulator;
pub mod snapshot;
pub mod ui;

pub use error::{Error, Result};
pub use session::Session;
