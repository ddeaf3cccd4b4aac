//! Maintenance-status derivation.
//!
//! # Responsibility
//! - Count elapsed calendar months between two dates.
//! - Classify a component's last service date into a maintenance status.
//!
//! # Invariants
//! - Month arithmetic ignores the day of month: `2024-01-31 -> 2024-02-01`
//!   is one month.
//! - A service date in the future yields a negative count and classifies as
//!   up to date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Months since last service at which a component is overdue.
pub const OVERDUE_AFTER_MONTHS: i32 = 6;
/// Months since last service at which a component is due soon.
pub const DUE_SOON_AFTER_MONTHS: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceStatus {
    Overdue,
    #[serde(rename = "Due Soon")]
    DueSoon,
    #[serde(rename = "Up to Date")]
    UpToDate,
}

impl MaintenanceStatus {
    /// Classifies a last-maintenance date as of `today`.
    pub fn classify(last_maintenance: NaiveDate, today: NaiveDate) -> Self {
        Self::from_elapsed_months(elapsed_months(last_maintenance, today))
    }

    pub fn from_elapsed_months(months: i32) -> Self {
        if months >= OVERDUE_AFTER_MONTHS {
            Self::Overdue
        } else if months >= DUE_SOON_AFTER_MONTHS {
            Self::DueSoon
        } else {
            Self::UpToDate
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "Overdue",
            Self::DueSoon => "Due Soon",
            Self::UpToDate => "Up to Date",
        }
    }
}

impl Display for MaintenanceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole calendar months from `from` to `to`; negative when `to` is earlier.
pub fn elapsed_months(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

#[cfg(test)]
mod tests {
    use super::{elapsed_months, MaintenanceStatus};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn exactly_six_months_is_overdue() {
        assert_eq!(
            MaintenanceStatus::classify(date(2024, 3, 12), date(2024, 9, 12)),
            MaintenanceStatus::Overdue
        );
    }

    #[test]
    fn exactly_four_months_is_due_soon() {
        assert_eq!(
            MaintenanceStatus::classify(date(2024, 3, 12), date(2024, 7, 12)),
            MaintenanceStatus::DueSoon
        );
    }

    #[test]
    fn three_months_is_up_to_date() {
        assert_eq!(
            MaintenanceStatus::classify(date(2024, 3, 12), date(2024, 6, 30)),
            MaintenanceStatus::UpToDate
        );
    }

    #[test]
    fn day_of_month_is_ignored() {
        assert_eq!(elapsed_months(date(2024, 1, 31), date(2024, 2, 1)), 1);
        assert_eq!(elapsed_months(date(2024, 3, 1), date(2024, 8, 31)), 5);
        assert_eq!(
            MaintenanceStatus::classify(date(2024, 3, 31), date(2024, 9, 1)),
            MaintenanceStatus::Overdue
        );
    }

    #[test]
    fn elapsed_months_crosses_year_boundaries() {
        assert_eq!(elapsed_months(date(2023, 12, 1), date(2024, 6, 1)), 6);
        assert_eq!(elapsed_months(date(2020, 1, 10), date(2024, 3, 12)), 50);
    }

    #[test]
    fn future_service_date_is_up_to_date() {
        assert_eq!(elapsed_months(date(2025, 1, 1), date(2024, 1, 1)), -12);
        assert_eq!(
            MaintenanceStatus::classify(date(2025, 1, 1), date(2024, 1, 1)),
            MaintenanceStatus::UpToDate
        );
    }
}
