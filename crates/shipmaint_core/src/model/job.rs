//! Maintenance job record.

use super::validation::{require, ValidationError};
use super::{normalize_label, Record};
use crate::storage::StorageKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Job categories offered when scheduling work.
pub const JOB_TYPES: [&str; 10] = [
    "Routine Inspection",
    "Preventive Maintenance",
    "Corrective Maintenance",
    "Emergency Repair",
    "System Upgrade",
    "Component Replacement",
    "Safety Check",
    "Performance Testing",
    "Calibration",
    "Other",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl JobPriority {
    pub const ALL: [JobPriority; 3] = [Self::High, Self::Medium, Self::Low];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl Display for JobPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobPriority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(value);
        Self::ALL
            .into_iter()
            .find(|priority| normalize_label(priority.as_str()) == wanted)
            .ok_or_else(|| format!("unknown job priority `{value}`"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(value);
        Self::ALL
            .into_iter()
            .find(|status| normalize_label(status.as_str()) == wanted)
            .ok_or_else(|| format!("unknown job status `{value}`"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub ship_id: String,
    pub component_id: String,
    /// Denormalized copy of the component name at last write.
    #[serde(default)]
    pub component_name: String,
    /// Short free-form label, serialized as `type`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// One of [`JOB_TYPES`] for jobs created through the services.
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub priority: JobPriority,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(with = "super::date")]
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assigned_engineer_id: String,
    /// Denormalized copy of the engineer name at last write.
    #[serde(default)]
    pub assigned_engineer_name: String,
}

impl Job {
    /// Creates a pending, medium-priority job.
    pub fn new(
        ship_id: impl Into<String>,
        component_id: impl Into<String>,
        scheduled_date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            ship_id: ship_id.into(),
            component_id: component_id.into(),
            component_name: String::new(),
            kind: String::new(),
            job_type: JOB_TYPES[0].to_string(),
            priority: JobPriority::Medium,
            status: JobStatus::Pending,
            scheduled_date,
            description: description.into(),
            assigned_engineer_id: String::new(),
            assigned_engineer_name: String::new(),
        }
    }

    /// Category used for per-type dashboard buckets: `jobType`, else `type`.
    pub fn type_bucket(&self) -> &str {
        let job_type = self.job_type.trim();
        if job_type.is_empty() {
            self.kind.trim()
        } else {
            job_type
        }
    }
}

impl Record for Job {
    const KEY: StorageKey = StorageKey::Jobs;
    const ID_PREFIX: &'static str = "j";
    const KIND: &'static str = "job";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.component_id, "Component")?;
        require(&self.assigned_engineer_id, "Engineer assignment")?;
        require(&self.description, "Description")?;
        Ok(())
    }
}
