//! The playground application state
//!
//! One record owns the editor adapter (with its widget and analyzer) and the
//! execution coordinator (with its engine). The UI loop only ever talks to it.

use std::sync::Arc;

use crossterm::event::Event;
use tracing::warn;

use crate::analysis::Analyzer;
use crate::config::Settings;
use crate::editor::{EditorAdapter, EditorPane, EditorSurface};
use crate::execution::{ExecutionCoordinator, Executor, RunError, RunEvent, RunEvents};
use crate::input::{self, Action};
use crate::syntax::RHAI;
use crate::theme::{self, Theme};

pub const SAMPLE_SOURCE: &str = r#"// Ctrl-R runs the script, Ctrl-Q quits
let a = 1;
let b = 2;
p("Hello, World!");
p("a + b = " + (a + b));
"#;

pub struct Playground<A> {
    pub editor: EditorAdapter<EditorPane, A>,
    pub execution: ExecutionCoordinator,
    pub theme: Theme,
    pub settings: Settings,
    pub message: Option<String>,
    pub running: bool,
}

impl<A: Analyzer> Playground<A> {
    pub fn new(
        source: &str,
        settings: Settings,
        analyzer: A,
        executor: Arc<dyn Executor>,
    ) -> (Self, RunEvents) {
        let theme = theme::get_builtin_theme(&settings.theme).unwrap_or_else(|| {
            warn!(theme = %settings.theme, "unknown theme, using default");
            Theme::default()
        });

        let pane = EditorPane::new(source, settings.tab_width);
        let mut editor = EditorAdapter::new(pane, analyzer, &RHAI);
        editor.mount();

        let (execution, events) = ExecutionCoordinator::new(executor);

        let playground = Self {
            editor,
            execution,
            theme,
            settings,
            message: None,
            running: true,
        };
        (playground, events)
    }

    pub fn pane(&self) -> &EditorPane {
        self.editor.surface()
    }

    pub fn pane_mut(&mut self) -> &mut EditorPane {
        self.editor.surface_mut()
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn handle_event(&mut self, event: Event) {
        if matches!(event, Event::Key(_)) {
            self.message = None;
        }

        match input::handle_event(self.pane_mut(), event) {
            Action::Edited => {
                let text = self.pane().text();
                self.editor.on_change(text);
            }
            Action::Run => self.request_run(),
            Action::Quit => self.running = false,
            Action::Redraw | Action::None => {}
        }
    }

    /// Start a run of the current document unless one is already going
    pub fn request_run(&mut self) {
        let source = self.editor.document().to_string();
        match self.execution.start(&source) {
            Ok(_) => {}
            Err(RunError::AlreadyRunning) => self.set_message("A run is already in progress"),
            Err(err) => {
                warn!(error = %err, "run request failed");
                self.set_message(format!("Cannot run: {err}"));
            }
        }
    }

    pub fn apply_run_event(&mut self, event: RunEvent) {
        self.execution.apply(event);
    }
}
