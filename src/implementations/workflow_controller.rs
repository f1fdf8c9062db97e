use chrono::Utc;
use log::{debug, info, warn};
use tokio::sync::watch;

use crate::config::WorkflowOptions;
use crate::errors::ErrorKind;
use crate::implementations::stage_ticker::StageTicker;
use crate::models::asset::GeneratedAsset;
use crate::models::workflow::{Phase, WorkflowState};
use crate::traits::asset_generator::AssetGenerator;

/// Stored as the error when a cycle is abandoned before the generator answers
pub const CANCELLED_MESSAGE: &str = "Generation was cancelled before a response arrived.";

/// Why a submission did not start a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The prompt was empty after trimming
    EmptyPrompt,
    /// A generation is already in flight
    InFlight,
}

/// Result of one call to [`WorkflowController::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored(IgnoreReason),
    Succeeded,
    Failed { kind: ErrorKind, message: String },
}

/// Drives one session through `Idle → Generating → Succeeded | Failed`.
///
/// The controller is the only writer of its [`WorkflowState`]. Every change
/// is published on a watch channel so a front-end can follow the pipeline
/// indicator while a request is pending.
pub struct WorkflowController<G: AssetGenerator> {
    generator: G,
    ticker: StageTicker,
    state: watch::Sender<WorkflowState>,
}

impl<G: AssetGenerator> WorkflowController<G> {
    pub fn new(generator: G, options: &WorkflowOptions) -> Self {
        Self::with_ticker(generator, StageTicker::new(options.step_interval()))
    }

    pub fn with_ticker(generator: G, ticker: StageTicker) -> Self {
        let (state, _) = watch::channel(WorkflowState::default());
        Self { generator, ticker, state }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> WorkflowState {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase()
    }

    /// Follow state changes
    pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
        self.state.subscribe()
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Run one generation cycle for `prompt`.
    ///
    /// Returns immediately with `Ignored` when the prompt is blank or a cycle
    /// is already running. The in-flight check and the move to `Generating`
    /// happen under the channel's lock, so concurrent submits start at most
    /// one request.
    pub async fn submit(&self, prompt: &str) -> SubmitOutcome {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            debug!("Ignoring submit with empty prompt");
            return SubmitOutcome::Ignored(IgnoreReason::EmptyPrompt);
        }

        let started = self.state.send_if_modified(|state| {
            if state.is_generating {
                return false;
            }
            state.begin(Utc::now());
            true
        });
        if !started {
            debug!("Ignoring submit while a generation is in flight");
            return SubmitOutcome::Ignored(IgnoreReason::InFlight);
        }

        info!("Generation cycle started");
        let mut cycle = CycleGuard { state: &self.state, finished: false };
        match self.generator.generate(prompt).await {
            Ok(asset) => {
                self.ticker
                    .walk(|step| self.state.send_modify(|state| state.current_step = step))
                    .await;
                cycle.succeed(asset);
                info!("Generation cycle succeeded");
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                let message = e.to_string();
                let kind = e.kind();
                warn!("Generation cycle failed ({:?}): {}", kind, message);
                cycle.fail(message.clone());
                SubmitOutcome::Failed { kind, message }
            }
        }
    }
}

/// Closes the cycle it guards. Dropping it before `succeed` or `fail` (the
/// submit future was dropped mid-call) records a cancellation, so the
/// controller never stays in `Generating`.
struct CycleGuard<'a> {
    state: &'a watch::Sender<WorkflowState>,
    finished: bool,
}

impl CycleGuard<'_> {
    fn succeed(&mut self, asset: GeneratedAsset) {
        self.finished = true;
        self.state.send_modify(|state| state.succeed(asset, Utc::now()));
    }

    fn fail(&mut self, message: String) {
        self.finished = true;
        self.state.send_modify(|state| state.fail(message, Utc::now()));
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("Generation cycle dropped while in flight");
            self.state.send_modify(|state| state.fail(CANCELLED_MESSAGE.to_string(), Utc::now()));
        }
    }
}
