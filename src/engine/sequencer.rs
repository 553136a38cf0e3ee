//! Sequencer - drives a script one step at a time
//!
//! Owns the ordered script for the duration of one run, paces steps for
//! observability, and emits exactly one log entry per attempted step. Step
//! failures never stop the run; the only early exit is an abort from the
//! host, taken between steps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{info, warn};

use crate::core::{ActionKind, Config, LogEntry, Outcome, RunReport, Script};
use crate::engine::bridge::ContextBridge;

/// Sequencer state over one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running { step: usize, total: usize },
    Aborted,
}

/// Progress events published while a run is in flight.
///
/// Progress is state owned by the sequencer and handed to the caller, not a
/// process-wide flag; drain these from the stream returned by
/// [`Sequencer::events`].
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// A step is about to be paced and dispatched
    StepStarted {
        step: usize,
        total: usize,
        action: ActionKind,
        selector: String,
    },
    /// A step's log entry was written
    StepLogged(LogEntry),
    /// The run finished, normally or by abort
    Completed { attempted: usize, total: usize },
}

/// Lets the host abandon a run between steps
#[derive(Debug, Clone)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    /// Request the run stop before its next step
    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Runs scripts strictly sequentially, one action in flight at a time
pub struct Sequencer {
    bridge: ContextBridge,
    inter_step: std::time::Duration,
    state: RunState,
    abort: Arc<AtomicBool>,
    events: Option<mpsc::UnboundedSender<RunEvent>>,
}

impl Sequencer {
    pub fn new(bridge: ContextBridge, config: &Config) -> Self {
        Self {
            bridge,
            inter_step: config.pacing.inter_step(),
            state: RunState::Idle,
            abort: Arc::new(AtomicBool::new(false)),
            events: None,
        }
    }

    /// Current state: the step index and total are live while running
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Handle the host can use to abandon the run between steps
    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle(self.abort.clone())
    }

    /// Subscribe to progress events for the next run
    pub fn events(&mut self) -> UnboundedReceiverStream<RunEvent> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.events = Some(sender);
        UnboundedReceiverStream::new(receiver)
    }

    fn emit(&self, event: RunEvent) {
        if let Some(sender) = &self.events {
            // A dropped receiver just means nobody is watching
            let _ = sender.send(event);
        }
    }

    /// Run the script to completion.
    ///
    /// Exactly one log entry is produced per attempted step, in step order,
    /// regardless of how many steps fail. Each action is attempted once;
    /// there is no retry.
    pub async fn run(&mut self, script: Script) -> RunReport {
        let total = script.len();
        let started_at = Utc::now();
        let mut entries = Vec::with_capacity(total);

        self.abort.store(false, Ordering::SeqCst);
        info!(total, "run started");

        for (index, action) in script.actions().iter().enumerate() {
            let step = index + 1;

            if self.abort.load(Ordering::SeqCst) {
                self.state = RunState::Aborted;
                warn!(step, "run aborted between steps");
                break;
            }

            self.state = RunState::Running { step, total };
            self.emit(RunEvent::StepStarted {
                step,
                total,
                action: action.kind,
                selector: action.selector.clone(),
            });

            // Pacing for observability, not correctness
            sleep(self.inter_step).await;

            let outcome = match self.bridge.execute_step(action, step).await {
                Ok(channel) => {
                    info!(step, %channel, action = %action.kind, "step succeeded");
                    Outcome::Success
                }
                Err(error) => {
                    warn!(step, action = %action.kind, %error, "step failed");
                    Outcome::Failed
                }
            };

            let entry = LogEntry::record(step, action, outcome);
            self.emit(RunEvent::StepLogged(entry.clone()));
            entries.push(entry);
        }

        if self.state != RunState::Aborted {
            self.state = RunState::Idle;
        }
        self.emit(RunEvent::Completed {
            attempted: entries.len(),
            total,
        });
        info!(attempted = entries.len(), total, "run finished");

        RunReport {
            entries,
            started_at,
            finished_at: Utc::now(),
        }
    }
}
