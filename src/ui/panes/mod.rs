//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Snippet display with syntax highlighting and the current operation's line
//! - [`model`]: The data structure as it stands after the current operation
//! - [`log`]: Execution log and surfaced errors
//! - [`status`]: Status bar with keybindings, speed and playback state
//!
//! Each pane module exports a primary `render_*` function plus whatever
//! scroll or render-data types it needs.

pub mod log;
pub mod model;
pub mod source;
pub mod status;

pub use log::render_log_pane;
pub use model::render_model_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
