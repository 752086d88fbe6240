//! Sandboxed Rhai engine construction shared by analysis and execution

use rhai::Engine;
use tracing::debug;

use crate::config::Settings;

/// Safety limits applied to every engine sparkpad builds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLimits {
    /// Operations per run before the script is aborted, 0 for unlimited
    pub max_operations: u64,
    pub max_expr_depth: usize,
}

impl EngineLimits {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_operations: settings.max_operations,
            max_expr_depth: settings.max_expr_depth,
        }
    }

    /// Create an engine with the limits applied and stray output silenced
    pub fn build_engine(&self) -> Engine {
        let mut engine = Engine::new();

        engine.set_max_expr_depths(self.max_expr_depth, self.max_expr_depth);
        engine.set_max_operations(self.max_operations);

        // The terminal belongs to the UI; nothing may write to stdout
        engine.on_print(|msg| debug!(target: "sparkpad::script", "print outside a run: {msg}"));
        engine.on_debug(|msg, source, pos| {
            debug!(target: "sparkpad::script", ?source, %pos, "{msg}");
        });

        engine
    }
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
