use async_trait::async_trait;
use thiserror::Error;

use crate::domain::*;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("config error: {0}")]
    ConfigError(String),
    #[error("timeout")]
    Timeout,
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Backend job endpoints the scheduling board talks to.
#[async_trait]
pub trait JobClient: Send + Sync {
    async fn list_jobs(&self) -> ClientResult<Vec<Job>>;

    /// PATCH a job's schedule. Returns the job as the server stored it.
    async fn update_job_schedule(
        &self,
        job_id: &str,
        patch: &SchedulePatch,
    ) -> ClientResult<Job>;
}
