use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

/// Drop-zone key for the unscheduled bucket.
pub const UNSCHEDULED_KEY: &str = "unscheduled";

/// Where a dragged job card was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    Unscheduled,
    Date(NaiveDate),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DropTargetError {
    #[error("empty drop target")]
    Empty,
    #[error("invalid drop target {0:?}: expected \"unscheduled\" or YYYY-MM-DD")]
    InvalidKey(String),
}

impl FromStr for DropTarget {
    type Err = DropTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if key.is_empty() {
            return Err(DropTargetError::Empty);
        }
        if key.eq_ignore_ascii_case(UNSCHEDULED_KEY) {
            return Ok(Self::Unscheduled);
        }
        NaiveDate::parse_from_str(key, "%Y-%m-%d")
            .map(Self::Date)
            .map_err(|_| DropTargetError::InvalidKey(key.to_string()))
    }
}

impl std::fmt::Display for DropTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unscheduled => f.write_str(UNSCHEDULED_KEY),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_drop_zone_keys() {
        assert_eq!("unscheduled".parse::<DropTarget>(), Ok(DropTarget::Unscheduled));
        assert_eq!(" Unscheduled ".parse::<DropTarget>(), Ok(DropTarget::Unscheduled));
        assert_eq!(
            "2026-02-10".parse::<DropTarget>(),
            Ok(DropTarget::Date(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()))
        );
    }

    #[test]
    fn rejects_garbage_keys() {
        assert_eq!("".parse::<DropTarget>(), Err(DropTargetError::Empty));
        assert_eq!(
            "2026-02-30".parse::<DropTarget>(),
            Err(DropTargetError::InvalidKey("2026-02-30".to_string()))
        );
        assert!("tomorrow".parse::<DropTarget>().is_err());
    }

    #[test]
    fn display_matches_drop_zone_key() {
        let target = DropTarget::Date(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
        assert_eq!(target.to_string(), "2026-03-04");
        assert_eq!(DropTarget::Unscheduled.to_string(), "unscheduled");
    }
}
