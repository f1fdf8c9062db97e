use chrono::{DateTime, Utc};
use std::fmt;

use crate::models::asset::GeneratedAsset;

/// Stages of the pipeline indicator, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WorkflowStep {
    #[default]
    Requirements,
    Design,
    Code,
    Tests,
    Simulation,
}

impl WorkflowStep {
    pub const ALL: [WorkflowStep; 5] = [
        WorkflowStep::Requirements,
        WorkflowStep::Design,
        WorkflowStep::Code,
        WorkflowStep::Tests,
        WorkflowStep::Simulation,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkflowStep::Requirements => "Req. Specification",
            WorkflowStep::Design => "System Design & UML",
            WorkflowStep::Code => "Code Synthesis",
            WorkflowStep::Tests => "Verification Suite",
            WorkflowStep::Simulation => "Simulation Loop",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStep::Requirements => "REQUIREMENTS",
            WorkflowStep::Design => "DESIGN",
            WorkflowStep::Code => "CODE",
            WorkflowStep::Tests => "TESTS",
            WorkflowStep::Simulation => "SIMULATION",
        };
        write!(f, "{}", name)
    }
}

/// Where the controller is in its request lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Generating,
    Succeeded,
    Failed,
}

/// Session state owned by the workflow controller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub is_generating: bool,
    /// Only meaningful while `is_generating` is set
    pub current_step: WorkflowStep,
    pub asset: Option<GeneratedAsset>,
    pub error: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl WorkflowState {
    pub fn phase(&self) -> Phase {
        if self.is_generating {
            Phase::Generating
        } else if self.asset.is_some() {
            Phase::Succeeded
        } else if self.error.is_some() {
            Phase::Failed
        } else {
            Phase::Idle
        }
    }

    /// Enter `Generating`, discarding the outcome of the previous cycle
    pub(crate) fn begin(&mut self, now: DateTime<Utc>) {
        self.is_generating = true;
        self.current_step = WorkflowStep::Requirements;
        self.asset = None;
        self.error = None;
        self.started_at = Some(now);
        self.finished_at = None;
    }

    pub(crate) fn succeed(&mut self, asset: GeneratedAsset, now: DateTime<Utc>) {
        self.is_generating = false;
        self.asset = Some(asset);
        self.error = None;
        self.finished_at = Some(now);
    }

    pub(crate) fn fail(&mut self, message: String, now: DateTime<Utc>) {
        self.is_generating = false;
        self.asset = None;
        self.error = Some(message);
        self.finished_at = Some(now);
    }

    /// Whether a pipeline stage should be drawn as done
    pub fn is_step_done(&self, step: WorkflowStep) -> bool {
        if self.is_generating {
            self.current_step > step
        } else {
            self.asset.is_some()
        }
    }

    /// Whether a pipeline stage should be drawn as in progress
    pub fn is_step_active(&self, step: WorkflowStep) -> bool {
        self.is_generating && self.current_step == step
    }

    pub fn elapsed(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}
