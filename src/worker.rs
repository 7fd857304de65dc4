use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::action::Action;
use crate::client::JobClient;
use crate::domain::SchedulePatch;

#[derive(Debug)]
pub enum SyncRequest {
    LoadJobs,
    PersistSchedule {
        job_id: String,
        mutation_id: Uuid,
        patch: SchedulePatch,
    },
}

#[derive(Clone)]
pub struct SyncHandle {
    tx: mpsc::UnboundedSender<SyncRequest>,
}

impl SyncHandle {
    pub fn send(&self, request: SyncRequest) {
        let _ = self.tx.send(request);
    }
}

pub struct SyncWorker {
    client: Arc<dyn JobClient>,
    rx: mpsc::UnboundedReceiver<SyncRequest>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl SyncWorker {
    pub fn new(
        client: Arc<dyn JobClient>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> (Self, SyncHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = SyncHandle { tx };
        let worker = Self {
            client,
            rx,
            action_tx,
        };
        (worker, handle)
    }

    pub async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            let action = self.process(request).await;
            if self.action_tx.send(action).is_err() {
                break;
            }
        }
    }

    async fn process(&self, request: SyncRequest) -> Action {
        match request {
            SyncRequest::LoadJobs => match self.client.list_jobs().await {
                Ok(jobs) => Action::JobsLoaded(jobs),
                Err(e) => {
                    tracing::warn!("failed to load jobs: {}", e);
                    Action::Error(format!("failed to load jobs: {}", e))
                }
            },
            SyncRequest::PersistSchedule {
                job_id,
                mutation_id,
                patch,
            } => match self.client.update_job_schedule(&job_id, &patch).await {
                Ok(job) => Action::ScheduleSaved {
                    job_id,
                    mutation_id,
                    job: Box::new(job),
                },
                Err(e) => {
                    tracing::warn!(%job_id, %mutation_id, "failed to save schedule: {}", e);
                    Action::ScheduleFailed {
                        job_id,
                        mutation_id,
                        message: format!("failed to save schedule: {}", e),
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryJobClient;
    use crate::domain::{Job, ScheduleUpdate};

    fn spawn_worker(
        client: Arc<MemoryJobClient>,
    ) -> (SyncHandle, mpsc::UnboundedReceiver<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (worker, handle) = SyncWorker::new(client, action_tx);
        tokio::spawn(worker.run());
        (handle, action_rx)
    }

    #[tokio::test]
    async fn load_jobs_reports_jobs_loaded() {
        let client = Arc::new(MemoryJobClient::new(vec![Job::new("J-1", "Tile repair")]));
        let (handle, mut actions) = spawn_worker(client);

        handle.send(SyncRequest::LoadJobs);
        match actions.recv().await {
            Some(Action::JobsLoaded(jobs)) => assert_eq!(jobs.len(), 1),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[tokio::test]
    async fn persist_failure_reports_schedule_failed_with_mutation_id() {
        let client = Arc::new(MemoryJobClient::new(vec![Job::new("J-1", "Tile repair")]));
        client.fail_next_writes(1).await;
        let (handle, mut actions) = spawn_worker(client);

        let mutation_id = Uuid::new_v4();
        handle.send(SyncRequest::PersistSchedule {
            job_id: "J-1".to_string(),
            mutation_id,
            patch: ScheduleUpdate::ClearSchedule.into(),
        });

        match actions.recv().await {
            Some(Action::ScheduleFailed {
                job_id,
                mutation_id: id,
                message,
            }) => {
                assert_eq!(job_id, "J-1");
                assert_eq!(id, mutation_id);
                assert!(message.starts_with("failed to save schedule"));
            }
            other => panic!("unexpected action {:?}", other),
        }
    }
}
