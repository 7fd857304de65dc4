use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::action::Action;
use crate::domain::*;
use crate::schedule::{apply_optimistic_schedule_change, compute_schedule_update};

#[derive(Debug, Clone)]
pub enum LoadState<T> {
    NotLoaded,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadJobs,
    PersistSchedule {
        job_id: String,
        mutation_id: Uuid,
        update: ScheduleUpdate,
    },
}

/// An optimistic schedule change waiting on the server.
#[derive(Debug, Clone)]
pub struct PendingMutation {
    pub mutation_id: Uuid,
    /// Last server-confirmed state of the job.
    pub snapshot: Job,
}

/// Client-side cache behind the scheduling board.
pub struct Board {
    pub jobs: LoadState<Vec<Job>>,
    pub pending: HashMap<String, PendingMutation>,
    pub last_error: Option<String>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            jobs: LoadState::NotLoaded,
            pending: HashMap::new(),
            last_error: None,
        }
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::DropJob { job_id, target } => self.drop_job(job_id, target),

            Action::JobsLoaded(jobs) => {
                self.jobs_loaded(jobs);
                vec![]
            }
            Action::ScheduleSaved {
                job_id,
                mutation_id,
                job,
            } => {
                if !self.is_current_mutation(&job_id, mutation_id) {
                    tracing::debug!(%job_id, %mutation_id, "ignoring stale schedule confirmation");
                    return vec![];
                }
                self.pending.remove(&job_id);
                self.replace_job(*job);
                vec![]
            }
            Action::ScheduleFailed {
                job_id,
                mutation_id,
                message,
            } => {
                if !self.is_current_mutation(&job_id, mutation_id) {
                    tracing::debug!(%job_id, %mutation_id, "ignoring stale schedule failure");
                    return vec![];
                }
                if let Some(pending) = self.pending.remove(&job_id) {
                    tracing::warn!(%job_id, "rolling back schedule change: {}", message);
                    self.replace_job(pending.snapshot);
                }
                self.last_error = Some(message);
                vec![Effect::LoadJobs]
            }

            Action::Refresh => {
                if self.jobs.data().is_none() {
                    self.jobs = LoadState::Loading;
                }
                vec![Effect::LoadJobs]
            }
            Action::Error(msg) => {
                if self.jobs.is_loading() {
                    self.jobs = LoadState::Error(msg.clone());
                }
                self.last_error = Some(msg);
                vec![]
            }
            Action::ClearError => {
                self.last_error = None;
                vec![]
            }
        }
    }

    pub fn job(&self, job_id: &str) -> Option<&Job> {
        self.jobs
            .data()
            .and_then(|jobs| jobs.iter().find(|job| job.id == job_id))
    }

    pub fn is_pending(&self, job_id: &str) -> bool {
        self.pending.contains_key(job_id)
    }

    pub fn unscheduled_jobs(&self) -> Vec<&Job> {
        self.all_jobs()
            .filter(|job| job.schedule_span().is_none())
            .collect()
    }

    /// Scheduled jobs whose span includes `date`.
    pub fn jobs_on(&self, date: NaiveDate) -> Vec<&Job> {
        self.all_jobs().filter(|job| job.covers(date)).collect()
    }

    fn all_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.data().into_iter().flatten()
    }

    fn drop_job(&mut self, job_id: String, target: DropTarget) -> Vec<Effect> {
        let Some(current) = self.job(&job_id).cloned() else {
            self.last_error = Some(format!("job {} is not on the board", job_id));
            return vec![];
        };

        let update = compute_schedule_update(&current, target);
        let optimistic = apply_optimistic_schedule_change(&current, &update);
        let mutation_id = Uuid::new_v4();

        // A second drag while the first is in flight keeps the original snapshot.
        let snapshot = match self.pending.remove(&job_id) {
            Some(previous) => previous.snapshot,
            None => current,
        };
        self.pending.insert(
            job_id.clone(),
            PendingMutation {
                mutation_id,
                snapshot,
            },
        );
        self.replace_job(optimistic);

        vec![Effect::PersistSchedule {
            job_id,
            mutation_id,
            update,
        }]
    }

    fn jobs_loaded(&mut self, mut jobs: Vec<Job>) {
        for job in jobs.iter_mut() {
            if self.pending.contains_key(&job.id) {
                if let Some(local) = self.job(&job.id) {
                    *job = local.clone();
                }
            }
        }
        self.jobs = LoadState::Loaded(jobs);
    }

    fn is_current_mutation(&self, job_id: &str, mutation_id: Uuid) -> bool {
        self.pending
            .get(job_id)
            .is_some_and(|pending| pending.mutation_id == mutation_id)
    }

    fn replace_job(&mut self, job: Job) {
        if let Some(jobs) = self.jobs.data_mut() {
            if let Some(slot) = jobs.iter_mut().find(|j| j.id == job.id) {
                *slot = job;
            }
        }
    }
}
