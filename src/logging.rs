//! Tracing subscriber setup
//!
//! The interactive playground owns the terminal, so it logs to a file in the
//! config directory; headless commands log to stderr.

use std::fs::{self, OpenOptions};
use std::panic;
use std::path::PathBuf;
use std::sync::{Mutex, Once};

use anyhow::{Context, Result};
use crossterm::terminal;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `SPARKPAD_LOG=debug`
pub const LOG_ENV: &str = "SPARKPAD_LOG";

pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init(target: LogTarget) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true);

    let installed = match target {
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))
}

/// Send panic reports to the log.
///
/// The default report is still printed unless the terminal is in raw mode,
/// where it would be written over the playground screen.
pub fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            error!(target: "sparkpad::panic", %info, "panic");
            if !terminal::is_raw_mode_enabled().unwrap_or(false) {
                default_panic(info);
            }
        }));
    });
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::Arc;

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn explode() {
        panic!("analyzer blew up");
    }

    #[test]
    fn caught_panics_reach_the_log() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        install_panic_hook();
        install_panic_hook();
        let caught = tracing::subscriber::with_default(subscriber, || panic::catch_unwind(explode));
        assert!(caught.is_err());

        let logged = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("sparkpad::panic"), "got {logged:?}");
        assert!(logged.contains("analyzer blew up"), "got {logged:?}");
    }
}
