use std::time::Duration;
use log::debug;

use crate::models::workflow::WorkflowStep;

/// Presentation-only progress schedule.
///
/// The ticker walks the pipeline stages on a fixed timeline once the backend
/// call has already returned. It carries no information about backend
/// progress; the service does not report any.
#[derive(Debug, Clone)]
pub struct StageTicker {
    schedule: Vec<WorkflowStep>,
    interval: Duration,
}

impl StageTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            schedule: WorkflowStep::ALL.to_vec(),
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn schedule(&self) -> &[WorkflowStep] {
        &self.schedule
    }

    /// Total time one walk takes
    pub fn duration(&self) -> Duration {
        self.interval * self.schedule.len() as u32
    }

    /// Announce each stage in order, pausing one interval after each
    pub async fn walk<F>(&self, mut on_step: F)
    where
        F: FnMut(WorkflowStep),
    {
        for step in &self.schedule {
            debug!("Pipeline stage: {}", step);
            on_step(*step);
            if !self.interval.is_zero() {
                tokio::time::sleep(self.interval).await;
            }
        }
    }
}

impl Default for StageTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(600))
    }
}
