use std::path::Path;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ClientError, ClientResult, JobClient};
use crate::domain::*;
use crate::schedule::apply_optimistic_schedule_change;

#[derive(Debug, Default)]
struct State {
    jobs: Vec<Job>,
    failures_remaining: u32,
}

/// In-process stand-in for the job backend.
///
/// Validates schedule patches the way the server does and applies them with
/// the same transformation the board uses optimistically.
#[derive(Debug, Default)]
pub struct MemoryJobClient {
    state: Mutex<State>,
}

impl MemoryJobClient {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self {
            state: Mutex::new(State {
                jobs,
                failures_remaining: 0,
            }),
        }
    }

    /// Seed from a JSON array of job records.
    pub fn from_json_file(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        let jobs: Vec<Job> = serde_json::from_str(&content).map_err(|e| {
            ClientError::ParseError(format!("invalid jobs file {}: {}", path.display(), e))
        })?;
        tracing::info!("Loaded {} jobs from {}", jobs.len(), path.display());
        Ok(Self::new(jobs))
    }

    /// Make the next `count` schedule writes fail without touching any job.
    pub async fn fail_next_writes(&self, count: u32) {
        self.state.lock().await.failures_remaining = count;
    }
}

#[async_trait]
impl JobClient for MemoryJobClient {
    async fn list_jobs(&self) -> ClientResult<Vec<Job>> {
        Ok(self.state.lock().await.jobs.clone())
    }

    async fn update_job_schedule(
        &self,
        job_id: &str,
        patch: &SchedulePatch,
    ) -> ClientResult<Job> {
        let mut state = self.state.lock().await;
        if state.failures_remaining > 0 {
            state.failures_remaining -= 1;
            return Err(ClientError::RequestFailed("service unavailable".to_string()));
        }

        let update =
            ScheduleUpdate::try_from(patch).map_err(|e| ClientError::Rejected(e.to_string()))?;
        if let ScheduleUpdate::SetDates {
            scheduled_start_date,
            scheduled_end_date,
        } = update
        {
            if scheduled_start_date > scheduled_end_date {
                return Err(ClientError::Rejected(format!(
                    "invalid date range {} > {}",
                    scheduled_start_date, scheduled_end_date
                )));
            }
        }

        let job = state
            .jobs
            .iter_mut()
            .find(|job| job.id == job_id)
            .ok_or_else(|| ClientError::NotFound(format!("job {}", job_id)))?;
        *job = apply_optimistic_schedule_change(job, &update);
        Ok(job.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    fn client() -> MemoryJobClient {
        MemoryJobClient::new(vec![
            Job::new("J-1", "Water heater install"),
            Job::new("J-2", "Drain clearing"),
        ])
    }

    fn patch(start: &str, end: &str) -> SchedulePatch {
        SchedulePatch {
            clear_schedule: false,
            scheduled_start_date: Some(date(start)),
            scheduled_end_date: Some(date(end)),
        }
    }

    #[tokio::test]
    async fn stores_accepted_schedule() {
        let client = client();
        let saved = client
            .update_job_schedule("J-2", &patch("2026-02-10", "2026-02-12"))
            .await
            .expect("update accepted");

        assert_eq!(saved.status, JobStatus::Scheduled);
        assert_eq!(saved.scheduled_end_date, Some(date("2026-02-12")));

        let jobs = client.list_jobs().await.expect("list jobs");
        assert_eq!(jobs[1], saved);
        assert_eq!(jobs[0].status, JobStatus::Unscheduled);
    }

    #[tokio::test]
    async fn rejects_inverted_range() {
        let client = client();
        let err = client
            .update_job_schedule("J-1", &patch("2026-02-12", "2026-02-10"))
            .await
            .expect_err("range rejected");
        assert!(matches!(err, ClientError::Rejected(_)));

        let jobs = client.list_jobs().await.unwrap();
        assert_eq!(jobs[0].schedule_span(), None);
    }

    #[tokio::test]
    async fn rejects_incomplete_patch() {
        let client = client();
        let incomplete = SchedulePatch {
            clear_schedule: false,
            scheduled_start_date: Some(date("2026-02-12")),
            scheduled_end_date: None,
        };
        let err = client
            .update_job_schedule("J-1", &incomplete)
            .await
            .expect_err("patch rejected");
        assert!(matches!(err, ClientError::Rejected(_)));
    }

    #[tokio::test]
    async fn unknown_job_is_not_found() {
        let err = client()
            .update_job_schedule("J-404", &patch("2026-02-10", "2026-02-10"))
            .await
            .expect_err("unknown job");
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[tokio::test]
    async fn injected_failures_are_consumed_in_order() {
        let client = client();
        client.fail_next_writes(1).await;

        let first = client
            .update_job_schedule("J-1", &patch("2026-02-10", "2026-02-10"))
            .await;
        assert!(matches!(first, Err(ClientError::RequestFailed(_))));

        let second = client
            .update_job_schedule("J-1", &patch("2026-02-10", "2026-02-10"))
            .await;
        assert!(second.is_ok());
    }

    #[test]
    fn missing_jobs_file_is_config_error() {
        let err = MemoryJobClient::from_json_file("/nonexistent/jobboard/jobs.json")
            .expect_err("missing file");
        assert!(matches!(err, ClientError::ConfigError(_)));
    }
}
