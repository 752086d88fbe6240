use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tracing::{error, info, warn};

use sparkpad::analysis::{AnalysisCoordinator, Marker, Severity};
use sparkpad::app::{Playground, SAMPLE_SOURCE};
use sparkpad::config::{ConfigEngine, Settings};
use sparkpad::execution::{ExecutionCoordinator, OutputKind, OutputSink, RunEvents};
use sparkpad::logging::{self, LogTarget};
use sparkpad::render::{Renderer, TerminalGuard};
use sparkpad::scripting::{EngineLimits, RhaiAnalyzer, RhaiExecutor};
use sparkpad::syntax::RHAI;

const USAGE: &str = "\
usage: sparkpad [FILE]          open the playground, seeded with FILE
       sparkpad --run FILE      run FILE and print its output
       sparkpad --check FILE    print diagnostics for FILE as JSON

Settings are read from <config dir>/sparkpad/init.rhai.
Set SPARKPAD_LOG to adjust logging (e.g. SPARKPAD_LOG=debug).";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Interactive(Option<PathBuf>),
    Run(PathBuf),
    Check(PathBuf),
    Help,
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args {
        [] => Ok(Command::Interactive(None)),
        [flag] if flag == "-h" || flag == "--help" => Ok(Command::Help),
        [flag, path] if flag == "--run" => Ok(Command::Run(PathBuf::from(path))),
        [flag, path] if flag == "--check" => Ok(Command::Check(PathBuf::from(path))),
        [flag, ..] if flag.starts_with("--") => {
            bail!("unknown or incomplete option {flag}\n\n{USAGE}")
        }
        [path] => Ok(Command::Interactive(Some(PathBuf::from(path)))),
        _ => bail!("too many arguments\n\n{USAGE}"),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = parse_args(&args)?;

    match &command {
        Command::Interactive(_) => {
            // The terminal belongs to the UI; without a config dir we stay silent
            if let Some(dir) = ConfigEngine::config_dir() {
                logging::init(LogTarget::File(dir.join("sparkpad.log")))?;
            }
            logging::install_panic_hook();
        }
        Command::Help => {}
        _ => logging::init(LogTarget::Stderr)?,
    }

    let settings = load_settings();

    match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Run(path) => run_headless(&path, &settings).await,
        Command::Check(path) => check(&path, &settings),
        Command::Interactive(path) => {
            let source = match path {
                Some(path) => read_source(&path)?,
                None => SAMPLE_SOURCE.to_string(),
            };
            run_interactive(&source, settings).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_settings() -> Settings {
    let mut config = ConfigEngine::new();
    match config.load_default() {
        Ok(()) => config.settings(),
        Err(err) => {
            warn!(error = %err, "config failed to load, using defaults");
            Settings::default()
        }
    }
}

fn is_script_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RHAI.matches_extension(ext))
}

fn read_source(path: &Path) -> Result<String> {
    if !is_script_path(path) {
        warn!(path = %path.display(), "not a .rhai file, treating it as Rhai anyway");
    }
    fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))
}

async fn run_headless(path: &Path, settings: &Settings) -> Result<ExitCode> {
    let source = read_source(path)?;
    let executor = RhaiExecutor::new(EngineLimits::from_settings(settings));
    let (mut execution, mut events) = ExecutionCoordinator::new(Arc::new(executor));

    let output = execution.run(&source, &mut events).await?;
    for line in output.lines() {
        println!("{line}");
    }

    Ok(if ended_with_error(output) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Whether the run's final line reports a failure
fn ended_with_error(output: &OutputSink) -> bool {
    output
        .lines()
        .last()
        .is_some_and(|line| OutputKind::classify(line) == OutputKind::Error)
}

fn check(path: &Path, settings: &Settings) -> Result<ExitCode> {
    let source = read_source(path)?;
    let analysis = AnalysisCoordinator::new(RhaiAnalyzer::new(EngineLimits::from_settings(
        settings,
    )));

    let markers: Vec<Marker> = analysis.analyze(&source).iter().map(Marker::from).collect();
    println!("{}", serde_json::to_string_pretty(&markers)?);

    let has_errors = markers.iter().any(|m| m.severity == Severity::Error);
    Ok(if has_errors {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn run_interactive(source: &str, settings: Settings) -> Result<()> {
    let limits = EngineLimits::from_settings(&settings);
    let (mut app, mut run_events) = Playground::new(
        source,
        settings,
        RhaiAnalyzer::new(limits),
        Arc::new(RhaiExecutor::new(limits)),
    );
    info!("playground started");

    let terminal = TerminalGuard::enter()?;
    let result = event_loop(&mut app, &mut run_events).await;
    drop(terminal);

    if app.execution.is_running() {
        // The engine worker cannot be interrupted; don't wait for it
        warn!("exiting with a run still in progress");
        let code = match &result {
            Ok(()) => 0,
            Err(err) => {
                error!(error = %err, "event loop failed");
                eprintln!("Error: {err:?}");
                1
            }
        };
        std::process::exit(code);
    }
    result
}

async fn event_loop(
    app: &mut Playground<RhaiAnalyzer>,
    run_events: &mut RunEvents,
) -> Result<()> {
    let mut renderer = Renderer::new()?;
    let mut event_stream = EventStream::new();

    // Initial render
    let height = renderer.text_height(app);
    app.pane_mut().adjust_scroll(height);
    renderer.render(app)?;

    while app.running {
        tokio::select! {
            maybe_event = event_stream.next() => match maybe_event {
                Some(Ok(event)) => {
                    if let Event::Resize(width, height) = event {
                        renderer.resize(width, height);
                    }
                    app.handle_event(event);
                }
                Some(Err(err)) => return Err(err).context("reading terminal events"),
                None => break,
            },
            Some(event) = run_events.recv() => app.apply_run_event(event),
        }

        let height = renderer.text_height(app);
        app.pane_mut().adjust_scroll(height);
        renderer.render(app)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_opens_sample() {
        assert_eq!(parse_args(&[]).unwrap(), Command::Interactive(None));
    }

    #[test]
    fn single_path_opens_file() {
        assert_eq!(
            parse_args(&args(&["demo.rhai"])).unwrap(),
            Command::Interactive(Some(PathBuf::from("demo.rhai")))
        );
    }

    #[test]
    fn headless_modes() {
        assert_eq!(
            parse_args(&args(&["--run", "a.rhai"])).unwrap(),
            Command::Run(PathBuf::from("a.rhai"))
        );
        assert_eq!(
            parse_args(&args(&["--check", "a.rhai"])).unwrap(),
            Command::Check(PathBuf::from("a.rhai"))
        );
        assert_eq!(parse_args(&args(&["--help"])).unwrap(), Command::Help);
    }

    #[test]
    fn exit_status_follows_the_final_line() {
        let mut output = OutputSink::new();
        output.push("Error: this is just program output");
        output.push("\nResult: 42");
        assert!(!ended_with_error(&output));

        output.push("Error: Division by zero");
        assert!(ended_with_error(&output));

        assert!(!ended_with_error(&OutputSink::new()));
    }

    #[test]
    fn script_extension_is_recognised() {
        assert!(is_script_path(Path::new("demo.rhai")));
        assert!(is_script_path(Path::new("DEMO.RHAI")));
        assert!(!is_script_path(Path::new("demo.rs")));
        assert!(!is_script_path(Path::new("demo")));
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(parse_args(&args(&["--run"])).is_err());
        assert!(parse_args(&args(&["--frobnicate", "x"])).is_err());
        assert!(parse_args(&args(&["a", "b"])).is_err());
    }
}
