//! Drag-and-drop schedule calculation.
//!
//! Dropping a job card either clears its schedule (the unscheduled bucket) or
//! moves it so it starts on the target date while keeping its day span. All
//! arithmetic is on calendar dates, so time zones and DST never shift a day.

use chrono::{Days, NaiveDate};

use crate::domain::{DropTarget, Job, JobStatus, ScheduleUpdate};

/// Inclusive day span of the job's current schedule.
///
/// Unscheduled and half-scheduled jobs count as one day, as does a range whose
/// end precedes its start.
pub fn schedule_duration_days(job: &Job) -> u64 {
    match job.schedule_span() {
        Some((start, end)) => {
            let days = (end - start).num_days() + 1;
            u64::try_from(days).unwrap_or(1).max(1)
        }
        None => 1,
    }
}

/// Decide how a job's schedule changes when it is dropped on `target`.
pub fn compute_schedule_update(job: &Job, target: DropTarget) -> ScheduleUpdate {
    let update = match target {
        DropTarget::Unscheduled => ScheduleUpdate::ClearSchedule,
        DropTarget::Date(start) => {
            let duration = schedule_duration_days(job);
            ScheduleUpdate::SetDates {
                scheduled_start_date: start,
                scheduled_end_date: add_days_saturating(start, duration - 1),
            }
        }
    };
    tracing::debug!(job_id = %job.id, %target, ?update, "computed schedule update");
    update
}

/// The job as it should render locally right after the drop, before the
/// server confirms.
pub fn apply_optimistic_schedule_change(job: &Job, update: &ScheduleUpdate) -> Job {
    let mut next = job.clone();
    match *update {
        ScheduleUpdate::ClearSchedule => {
            next.status = JobStatus::Unscheduled;
            next.scheduled_start_date = None;
            next.scheduled_end_date = None;
        }
        ScheduleUpdate::SetDates {
            scheduled_start_date,
            scheduled_end_date,
        } => {
            next.status = JobStatus::Scheduled;
            next.scheduled_start_date = Some(scheduled_start_date);
            next.scheduled_end_date = Some(scheduled_end_date);
        }
    }
    next
}

fn add_days_saturating(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}
