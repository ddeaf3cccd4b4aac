//! Core domain logic for ship maintenance tracking.
//! This crate is the single source of truth for status derivation and
//! dashboard aggregation.

pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod logging;
pub mod maintenance;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use config::{AppConfig, ConfigOverrides};
pub use dashboard::{calculate_dashboard_stats, compute_dashboard_stats, DashboardStats};
pub use logging::{default_log_level, init_logging, logging_status};
pub use maintenance::{elapsed_months, MaintenanceStatus};
pub use model::component::Component;
pub use model::job::{Job, JobPriority, JobStatus, JOB_TYPES};
pub use model::notification::{Notification, NotificationKind};
pub use model::ship::{Ship, ShipStatus};
pub use model::user::{User, UserRole};
pub use model::{Record, ValidationError};
pub use repo::record_repo::{KvRecordRepository, RecordRepository, RepoError, RepoResult};
pub use service::auth_service::{AuthError, AuthService};
pub use service::component_service::{ComponentService, ComponentView};
pub use service::fleet_service::{FleetService, ShipDetail};
pub use service::job_service::JobService;
pub use service::notification_service::{format_relative, NotificationService};
pub use service::seed::{seed_sample_data, SeedReport};
pub use storage::{KeyValueStore, SqliteKeyValueStore, StorageError, StorageKey};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
