//! State simulation
//!
//! [`engine`] replays an operation list against a [`ModelState`] starting from
//! the canonical empty value and records a [`Snapshot`] after every operation.
//!
//! # Totality
//!
//! A run never fails part way. Removing from an empty model, clamped indices
//! and operations that don't fit the model all produce a snapshot with an
//! explanatory effect, so a timeline always has exactly one snapshot per
//! operation.
//!
//! [`ModelState`]: crate::model::ModelState
//! [`Snapshot`]: crate::snapshot::Snapshot

pub mod engine;

pub use engine::{simulate, Simulator};
