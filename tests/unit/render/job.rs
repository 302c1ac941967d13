use super::*;
use crate::foundation::core::TileSize;

fn job(rows: u32) -> RenderJob {
    RenderJob::new(GridPlan::new(64, rows * 16, TileSize::new(16, 16).unwrap()).unwrap())
}

#[test]
fn new_job_is_pending_with_output_size() {
    let j = job(3);
    let snap = j.snapshot();
    assert_eq!(snap.status, JobStatus::Pending);
    assert_eq!((snap.width, snap.height), (64, 48));
    assert_eq!(snap.progress, 0);
}

#[test]
fn rows_advance_progress_then_complete() {
    let mut j = job(3);
    j.begin();
    assert_eq!(j.status(), JobStatus::Running);

    let mut seen = Vec::new();
    for row in 0..3 {
        j.row_drawn(row);
        seen.push(j.progress());
    }
    assert_eq!(seen, vec![33, 66, 100]);

    j.complete();
    assert_eq!(j.status(), JobStatus::Complete);
    assert_eq!(j.snapshot().rows_done, 3);
}

#[test]
fn terminal_states_are_sinks() {
    let mut j = job(4);
    j.begin();
    j.row_drawn(0);
    j.fail();
    assert_eq!(j.status(), JobStatus::Error);

    j.row_drawn(1);
    j.complete();
    j.begin();
    assert_eq!(j.status(), JobStatus::Error);
    assert_eq!(j.progress(), 25);
}

#[test]
fn progress_never_decreases() {
    let mut j = job(4);
    j.begin();
    j.row_drawn(2);
    j.row_drawn(0);
    assert_eq!(j.progress(), 75);
}

#[test]
fn rows_before_begin_are_ignored() {
    let mut j = job(2);
    j.row_drawn(0);
    j.complete();
    assert_eq!(j.status(), JobStatus::Pending);
    assert_eq!(j.progress(), 0);
}

#[test]
fn empty_grid_completes_at_100() {
    let mut j = RenderJob::new(GridPlan::new(0, 0, TileSize::default()).unwrap());
    j.begin();
    j.complete();
    assert_eq!(j.progress(), 100);
    assert!(j.status().is_terminal());
}
