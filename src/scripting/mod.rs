//! Scripting module - the Rhai realisation of the analyzer and the engine
//!
//! - [`RhaiAnalyzer`] compiles the source and reports parse errors
//! - [`RhaiExecutor`] evaluates the source with the capture functions installed
//!
//! Both build their engine from the same [`EngineLimits`].

mod analyzer;
mod engine;
mod executor;

pub use analyzer::RhaiAnalyzer;
pub use engine::EngineLimits;
pub use executor::RhaiExecutor;
