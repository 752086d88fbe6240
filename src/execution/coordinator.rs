use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, trace};

use super::{Capture, EngineError, ExecutionContext, Executor, OutputSink, RunError};

/// Identifies one run; output from other runs is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u64);

impl RunId {
    pub fn first() -> Self {
        RunId(1)
    }

    fn next(self) -> Self {
        RunId(self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

impl RunState {
    pub fn display(&self) -> &'static str {
        match self {
            RunState::Idle => "IDLE",
            RunState::Running => "RUNNING",
        }
    }
}

/// Messages sent from a run worker back to the coordinator
#[derive(Debug)]
pub enum RunEvent {
    Output {
        run: RunId,
        line: String,
    },
    Finished {
        run: RunId,
        outcome: Result<String, EngineError>,
    },
}

/// Receiving end of the run event channel
pub struct RunEvents {
    rx: UnboundedReceiver<RunEvent>,
}

impl RunEvents {
    pub async fn recv(&mut self) -> Option<RunEvent> {
        self.rx.recv().await
    }
}

/// Owns the run state machine and the output log
pub struct ExecutionCoordinator {
    executor: Arc<dyn Executor>,
    state: RunState,
    output: OutputSink,
    active: Option<RunId>,
    next_run: RunId,
    events: UnboundedSender<RunEvent>,
}

impl ExecutionCoordinator {
    pub fn new(executor: Arc<dyn Executor>) -> (Self, RunEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        let coordinator = Self {
            executor,
            state: RunState::Idle,
            output: OutputSink::new(),
            active: None,
            next_run: RunId::first(),
            events: tx,
        };
        (coordinator, RunEvents { rx })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn output(&self) -> &OutputSink {
        &self.output
    }

    /// Begin executing `source` on a blocking worker.
    ///
    /// Rejected while another run is in flight. Must be called from within a
    /// tokio runtime.
    pub fn start(&mut self, source: &str) -> Result<RunId, RunError> {
        if self.state != RunState::Idle {
            return Err(RunError::AlreadyRunning);
        }
        let handle = Handle::try_current().map_err(|_| RunError::NoRuntime)?;

        let run = self.next_run;
        self.next_run = run.next();
        self.active = Some(run);
        self.state = RunState::Running;
        self.output.clear();
        info!(?run, bytes = source.len(), "run started");

        let executor = Arc::clone(&self.executor);
        let events = self.events.clone();
        let source = source.to_string();

        handle.spawn(async move {
            // One scheduling tick so the Running state is drawn first
            tokio::task::yield_now().await;

            let context = ExecutionContext::new(Capture::new(run, events.clone()));
            let worker = tokio::task::spawn_blocking(move || executor.execute(&source, &context));
            let outcome = match worker.await {
                Ok(outcome) => outcome,
                Err(err) => Err(EngineError::new(format!("engine worker failed: {err}"))),
            };

            if events.send(RunEvent::Finished { run, outcome }).is_err() {
                debug!(?run, "run finished after coordinator was dropped");
            }
        });

        Ok(run)
    }

    /// Fold a worker message into the output log and state.
    ///
    /// Returns true when the event finished the active run.
    pub fn apply(&mut self, event: RunEvent) -> bool {
        match event {
            RunEvent::Output { run, line } if self.active == Some(run) => {
                self.output.push(line);
                false
            }
            RunEvent::Finished { run, outcome } if self.active == Some(run) => {
                match outcome {
                    Ok(value) => self.output.push(format!("\nResult: {value}")),
                    Err(err) => self.output.push(format!("Error: {}", err.message)),
                }
                self.active = None;
                self.state = RunState::Idle;
                info!(?run, lines = self.output.len(), "run finished");
                true
            }
            stale => {
                trace!(?stale, "ignoring event for inactive run");
                false
            }
        }
    }

    /// Start a run and drain events until it completes
    pub async fn run(
        &mut self,
        source: &str,
        events: &mut RunEvents,
    ) -> Result<&OutputSink, RunError> {
        self.start(source)?;
        while let Some(event) = events.recv().await {
            if self.apply(event) {
                break;
            }
        }
        Ok(&self.output)
    }
}
