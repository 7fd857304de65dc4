use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Unscheduled,
    Scheduled,
    InProgress,
    OnHold,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unscheduled => "UNSCHEDULED",
            Self::Scheduled => "SCHEDULED",
            Self::InProgress => "IN_PROGRESS",
            Self::OnHold => "ON_HOLD",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Unscheduled => "○",
            Self::Scheduled => "●",
            Self::InProgress => "▶",
            Self::OnHold => "‖",
            Self::Completed => "✓",
            Self::Cancelled => "✗",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A job record as the backend returns it.
///
/// Only the fields the scheduling board reads are typed. Everything else the
/// backend sends lands in `extra` and is written back out untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub scheduled_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub scheduled_end_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Job {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            customer_name: None,
            status: JobStatus::Unscheduled,
            scheduled_start_date: None,
            scheduled_end_date: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Both schedule dates, when the job carries a complete schedule.
    pub fn schedule_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.scheduled_start_date, self.scheduled_end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.schedule_span()
            .is_some_and(|(start, end)| start <= date && date <= end)
    }
}
