mod engine;
mod settings;

pub use engine::{ConfigEngine, ConfigError};
pub use settings::Settings;
