use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The schedule mutation a drop resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleUpdate {
    ClearSchedule,
    SetDates {
        scheduled_start_date: NaiveDate,
        scheduled_end_date: NaiveDate,
    },
}

/// Request body for the job schedule PATCH.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePatch {
    pub clear_schedule: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_end_date: Option<NaiveDate>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("patch sets dates but scheduledStartDate is missing")]
    MissingStartDate,
    #[error("patch sets dates but scheduledEndDate is missing")]
    MissingEndDate,
}

impl From<ScheduleUpdate> for SchedulePatch {
    fn from(update: ScheduleUpdate) -> Self {
        match update {
            ScheduleUpdate::ClearSchedule => Self {
                clear_schedule: true,
                scheduled_start_date: None,
                scheduled_end_date: None,
            },
            ScheduleUpdate::SetDates {
                scheduled_start_date,
                scheduled_end_date,
            } => Self {
                clear_schedule: false,
                scheduled_start_date: Some(scheduled_start_date),
                scheduled_end_date: Some(scheduled_end_date),
            },
        }
    }
}

impl TryFrom<&SchedulePatch> for ScheduleUpdate {
    type Error = PatchError;

    fn try_from(patch: &SchedulePatch) -> Result<Self, Self::Error> {
        if patch.clear_schedule {
            return Ok(Self::ClearSchedule);
        }
        let scheduled_start_date = patch
            .scheduled_start_date
            .ok_or(PatchError::MissingStartDate)?;
        let scheduled_end_date = patch
            .scheduled_end_date
            .ok_or(PatchError::MissingEndDate)?;
        Ok(Self::SetDates {
            scheduled_start_date,
            scheduled_end_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clear_patch_serializes_to_flag_only() {
        let patch = SchedulePatch::from(ScheduleUpdate::ClearSchedule);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"clearSchedule": true})
        );
    }

    #[test]
    fn set_dates_patch_carries_iso_dates() {
        let patch = SchedulePatch::from(ScheduleUpdate::SetDates {
            scheduled_start_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            scheduled_end_date: NaiveDate::from_ymd_opt(2026, 2, 12).unwrap(),
        });
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({
                "clearSchedule": false,
                "scheduledStartDate": "2026-02-10",
                "scheduledEndDate": "2026-02-12"
            })
        );
    }

    #[test]
    fn incomplete_patch_does_not_convert() {
        let patch: SchedulePatch = serde_json::from_value(json!({
            "clearSchedule": false,
            "scheduledStartDate": "2026-02-10"
        }))
        .unwrap();

        assert_eq!(
            ScheduleUpdate::try_from(&patch),
            Err(PatchError::MissingEndDate)
        );
    }
}
