use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use rhai::{Dynamic, Engine, Scope};
use thiserror::Error;
use tracing::{debug, info};

use super::Settings;
use crate::theme;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("config error: {0}")]
    Eval(String),
}

/// The Rhai scripting engine for configuration
pub struct ConfigEngine {
    engine: Engine,
    settings: Arc<RwLock<Settings>>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        let settings = Arc::new(RwLock::new(Settings::default()));
        let engine = Self::create_engine(Arc::clone(&settings));

        Self { engine, settings }
    }

    fn create_engine(settings: Arc<RwLock<Settings>>) -> Engine {
        let mut engine = Engine::new();

        // Limit script execution for safety
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(100_000);

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_theme", move |name: &str| {
                if let Ok(mut settings) = s.write() {
                    settings.theme = name.to_string();
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("get_theme", move || -> String {
                s.read().map(|s| s.theme.clone()).unwrap_or_default()
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_tab_width", move |width: i64| {
                if let Ok(mut settings) = s.write() {
                    settings.tab_width = width.clamp(1, 16) as usize;
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_show_line_numbers", move |enabled: bool| {
                if let Ok(mut settings) = s.write() {
                    settings.show_line_numbers = enabled;
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_output_height", move |rows: i64| {
                if let Ok(mut settings) = s.write() {
                    settings.output_height = rows.clamp(3, 40) as u16;
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_max_operations", move |ops: i64| {
                if let Ok(mut settings) = s.write() {
                    settings.max_operations = ops.max(0) as u64;
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_max_expr_depth", move |depth: i64| {
                if let Ok(mut settings) = s.write() {
                    settings.max_expr_depth = depth.clamp(1, 1024) as usize;
                }
            });
        }

        engine.register_fn("list_themes", || -> rhai::Array {
            theme::list_builtin_themes()
                .into_iter()
                .map(|name| Dynamic::from(name.to_string()))
                .collect()
        });

        engine.on_print(|msg| debug!(target: "sparkpad::config", "{msg}"));

        engine
    }

    /// Load and execute a config file
    pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.eval(&content)
    }

    /// Evaluate a Rhai config script
    pub fn eval(&mut self, script: &str) -> Result<(), ConfigError> {
        let ast = self
            .engine
            .compile(script)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut scope = Scope::new();
        self.engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|e| ConfigError::Eval(e.to_string()))?;

        Ok(())
    }

    /// Get the current settings (cloned)
    pub fn settings(&self) -> Settings {
        self.settings.read().map(|s| s.clone()).unwrap_or_default()
    }

    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sparkpad"))
    }

    /// Get the default config file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("init.rhai"))
    }

    /// Load the default config file if it exists
    pub fn load_default(&mut self) -> Result<(), ConfigError> {
        if let Some(config_file) = Self::config_file() {
            if config_file.exists() {
                info!(path = %config_file.display(), "loading config");
                return self.load_file(&config_file);
            }
        }
        Ok(()) // No config file is fine
    }
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self::new()
    }
}
