//! Dashboard KPI aggregation.
//!
//! # Responsibility
//! - Derive ship/component/job counts shown on the dashboard.
//! - Bucket jobs by priority and type, components by health.
//!
//! # Invariants
//! - Aggregation is pure over the given slices and `today`.
//! - Priority buckets always carry High, Medium and Low, even when zero.
//! - Reading from storage never fails on missing or malformed collections.

use crate::maintenance::MaintenanceStatus;
use crate::model::component::Component;
use crate::model::job::{Job, JobPriority, JobStatus};
use crate::model::ship::Ship;
use crate::storage::{load_collection, KeyValueStore, StorageKey, StorageResult};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Job counts per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PriorityBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityBreakdown {
    pub fn get(&self, priority: JobPriority) -> usize {
        match priority {
            JobPriority::High => self.high,
            JobPriority::Medium => self.medium,
            JobPriority::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }

    /// Share of `priority` in percent; 0 when there are no jobs.
    pub fn percentage(&self, priority: JobPriority) -> f64 {
        percentage(self.get(priority), self.total())
    }

    fn bump(&mut self, priority: JobPriority) {
        match priority {
            JobPriority::High => self.high += 1,
            JobPriority::Medium => self.medium += 1,
            JobPriority::Low => self.low += 1,
        }
    }
}

/// Component counts per dashboard health category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComponentHealthBreakdown {
    #[serde(rename = "Active")]
    pub active: usize,
    #[serde(rename = "Under Maintenance")]
    pub under_maintenance: usize,
    #[serde(rename = "Needs Attention")]
    pub needs_attention: usize,
}

impl ComponentHealthBreakdown {
    pub fn total(&self) -> usize {
        self.active + self.under_maintenance + self.needs_attention
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_ships: usize,
    pub overdue_components: usize,
    pub jobs_in_progress: usize,
    pub jobs_completed: usize,
    pub jobs_by_priority: PriorityBreakdown,
    pub jobs_by_type: BTreeMap<String, usize>,
    pub components_by_status: ComponentHealthBreakdown,
}

/// Aggregates dashboard counts over in-memory collections.
pub fn compute_dashboard_stats(
    ships: &[Ship],
    components: &[Component],
    jobs: &[Job],
    today: NaiveDate,
) -> DashboardStats {
    let mut stats = DashboardStats {
        total_ships: ships.len(),
        ..DashboardStats::default()
    };

    let mut components_in_service = HashSet::new();
    for job in jobs {
        match job.status {
            JobStatus::InProgress => {
                stats.jobs_in_progress += 1;
                components_in_service.insert(job.component_id.as_str());
            }
            JobStatus::Completed => stats.jobs_completed += 1,
            JobStatus::Pending | JobStatus::Cancelled => {}
        }
        stats.jobs_by_priority.bump(job.priority);
        *stats
            .jobs_by_type
            .entry(job.type_bucket().to_string())
            .or_insert(0) += 1;
    }

    for component in components {
        if component.maintenance_status(today) == MaintenanceStatus::Overdue {
            stats.overdue_components += 1;
            stats.components_by_status.needs_attention += 1;
        } else if components_in_service.contains(component.id.as_str()) {
            stats.components_by_status.under_maintenance += 1;
        } else {
            stats.components_by_status.active += 1;
        }
    }

    stats
}

/// Loads the three collections from storage and aggregates them.
pub fn calculate_dashboard_stats<S>(store: &S, today: NaiveDate) -> StorageResult<DashboardStats>
where
    S: KeyValueStore + ?Sized,
{
    let ships: Vec<Ship> = load_collection(store, StorageKey::Ships)?;
    let components: Vec<Component> = load_collection(store, StorageKey::Components)?;
    let jobs: Vec<Job> = load_collection(store, StorageKey::Jobs)?;

    let stats = compute_dashboard_stats(&ships, &components, &jobs, today);
    debug!(
        "event=dashboard_stats module=dashboard status=ok ships={} components={} jobs={} overdue={}",
        ships.len(),
        components.len(),
        jobs.len(),
        stats.overdue_components
    );
    Ok(stats)
}

/// `part / total` in percent, rounded to one decimal; 0 when `total == 0`.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}
