use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info};

use crate::foundation::error::MosaicError;

/// Lifecycle state of a render job. `Complete` and `Error` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Pending,
    Running,
    Complete,
    Error,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }
}

/// What an observer sees of the job at each notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JobSnapshot {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Percent of rows drawn, 0..=100.
    pub progress: u8,
    /// Number of rows fully drawn so far.
    pub rows_done: u32,
    pub rows: u32,
    pub status: JobStatus,
}

/// Receives lifecycle notifications from a render.
///
/// For every `start` call: `on_start` exactly once, then zero or more `on_progress`, then exactly
/// one of `on_complete` or `on_error`.
pub trait RenderObserver: Send {
    fn on_start(&mut self, _job: &JobSnapshot) {}

    fn on_progress(&mut self, _job: &JobSnapshot) {}

    fn on_complete(&mut self, _job: &JobSnapshot) {}

    fn on_error(&mut self, _job: &JobSnapshot, _err: &MosaicError) {}
}

impl RenderObserver for () {}

/// Owned form of a notification, for channel- or log-based hosts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderEvent {
    Started(JobSnapshot),
    Progress(JobSnapshot),
    Completed(JobSnapshot),
    Failed { job: JobSnapshot, error: String },
}

impl RenderEvent {
    pub fn job(&self) -> &JobSnapshot {
        match self {
            Self::Started(job) | Self::Progress(job) | Self::Completed(job) => job,
            Self::Failed { job, .. } => job,
        }
    }
}

impl RenderObserver for Vec<RenderEvent> {
    fn on_start(&mut self, job: &JobSnapshot) {
        self.push(RenderEvent::Started(*job));
    }

    fn on_progress(&mut self, job: &JobSnapshot) {
        self.push(RenderEvent::Progress(*job));
    }

    fn on_complete(&mut self, job: &JobSnapshot) {
        self.push(RenderEvent::Completed(*job));
    }

    fn on_error(&mut self, job: &JobSnapshot, err: &MosaicError) {
        self.push(RenderEvent::Failed {
            job: *job,
            error: err.to_string(),
        });
    }
}

// A dropped receiver only means nobody is listening any more.
impl RenderObserver for UnboundedSender<RenderEvent> {
    fn on_start(&mut self, job: &JobSnapshot) {
        let _ = self.send(RenderEvent::Started(*job));
    }

    fn on_progress(&mut self, job: &JobSnapshot) {
        let _ = self.send(RenderEvent::Progress(*job));
    }

    fn on_complete(&mut self, job: &JobSnapshot) {
        let _ = self.send(RenderEvent::Completed(*job));
    }

    fn on_error(&mut self, job: &JobSnapshot, err: &MosaicError) {
        let _ = self.send(RenderEvent::Failed {
            job: *job,
            error: err.to_string(),
        });
    }
}

/// Reports lifecycle events through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl RenderObserver for LogObserver {
    fn on_start(&mut self, job: &JobSnapshot) {
        info!(
            width = job.width,
            height = job.height,
            rows = job.rows,
            "mosaic started"
        );
    }

    fn on_progress(&mut self, job: &JobSnapshot) {
        info!(progress = job.progress, row = job.rows_done, "mosaic progress");
    }

    fn on_complete(&mut self, job: &JobSnapshot) {
        info!(width = job.width, height = job.height, "mosaic complete");
    }

    fn on_error(&mut self, job: &JobSnapshot, err: &MosaicError) {
        error!(progress = job.progress, error = %err, "mosaic failed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/progress.rs"]
mod tests;
