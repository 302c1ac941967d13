use crate::{
    layout::grid::GridPlan,
    render::progress::{JobSnapshot, JobStatus},
};

/// Mutable state of one render, owned by the task driving it.
///
/// Transitions out of a terminal state are ignored, and progress never decreases.
#[derive(Clone, Debug)]
pub struct RenderJob {
    plan: GridPlan,
    status: JobStatus,
    progress: u8,
    rows_done: u32,
}

impl RenderJob {
    pub fn new(plan: GridPlan) -> Self {
        Self {
            plan,
            status: JobStatus::Pending,
            progress: 0,
            rows_done: 0,
        }
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn begin(&mut self) {
        if self.status == JobStatus::Pending {
            self.status = JobStatus::Running;
            self.progress = 0;
        }
    }

    /// Record that `row` (0-based) has been drawn.
    pub fn row_drawn(&mut self, row: u32) {
        if self.status != JobStatus::Running {
            return;
        }
        self.rows_done = self.rows_done.max(row.saturating_add(1).min(self.plan.rows));
        self.progress = self.progress.max(self.plan.progress_after_row(row));
    }

    pub fn complete(&mut self) {
        if self.status == JobStatus::Running {
            self.status = JobStatus::Complete;
            self.progress = 100;
        }
    }

    pub fn fail(&mut self) {
        if self.status == JobStatus::Running {
            self.status = JobStatus::Error;
        }
    }

    pub fn snapshot(&self) -> JobSnapshot {
        JobSnapshot {
            width: self.plan.output_width,
            height: self.plan.output_height,
            progress: self.progress,
            rows_done: self.rows_done,
            rows: self.plan.rows,
            status: self.status,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/job.rs"]
mod tests;
