//! Maintenance calendar projections.

use crate::model::job::Job;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Groups jobs by scheduled day, preserving input order within a day.
pub fn jobs_by_date(jobs: &[Job]) -> BTreeMap<NaiveDate, Vec<&Job>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&Job>> = BTreeMap::new();
    for job in jobs {
        grouped.entry(job.scheduled_date).or_default().push(job);
    }
    grouped
}

/// Jobs scheduled within one calendar month, grouped by day.
///
/// Returns `None` when `month` is outside `1..=12`.
pub fn jobs_in_month(jobs: &[Job], year: i32, month: u32) -> Option<BTreeMap<NaiveDate, Vec<&Job>>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let mut grouped = jobs_by_date(jobs);
    grouped.retain(|date, _| date.year() == first.year() && date.month() == first.month());
    Some(grouped)
}

/// Number of days in the given month, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}
