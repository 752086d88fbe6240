//! sparkpad - a terminal playground for Rhai scripts
//!
//! The editor pane is analyzed on every keystroke and the run action executes
//! the current document on a worker, streaming captured output back to the UI.
//!
//! - [`editor`] - the editing widget and the adapter that feeds analysis
//! - [`analysis`] - analyzer boundary, diagnostics and markers
//! - [`execution`] - run lifecycle, capture context and output log
//! - [`scripting`] - Rhai implementations of the analyzer and the engine

pub mod analysis;
pub mod app;
pub mod config;
pub mod editor;
pub mod execution;
pub mod input;
pub mod logging;
pub mod render;
pub mod scripting;
pub mod syntax;
pub mod theme;
