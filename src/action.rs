use uuid::Uuid;

use crate::domain::*;

#[derive(Debug, Clone)]
pub enum Action {
    // Drag and drop
    DropJob {
        job_id: String,
        target: DropTarget,
    },

    // Data responses
    JobsLoaded(Vec<Job>),
    ScheduleSaved {
        job_id: String,
        mutation_id: Uuid,
        job: Box<Job>,
    },
    ScheduleFailed {
        job_id: String,
        mutation_id: Uuid,
        message: String,
    },

    // App control
    Refresh,
    Error(String),
    ClearError,
}
