//! Maintenance job use-case service.
//!
//! # Responsibility
//! - CRUD and status changes for maintenance jobs.
//! - Refresh denormalized component/engineer names on every write.
//! - Emit `job_created` / `job_updated` / `job_completed` notifications.
//!
//! # Invariants
//! - Referenced component/engineer ids are not required to exist; unresolved
//!   names are stored as empty strings.

use crate::model::component::Component;
use crate::model::job::{Job, JobStatus};
use crate::model::notification::{Notification, NotificationKind};
use crate::model::user::User;
use crate::model::Record;
use crate::repo::record_repo::{KvRecordRepository, RecordRepository, RepoError, RepoResult};
use crate::service::notification_service::NotificationService;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};

pub struct JobService<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S: KeyValueStore + ?Sized> JobService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    fn jobs(&self) -> KvRecordRepository<'s, Job, S> {
        KvRecordRepository::new(self.store)
    }

    /// Users that can be assigned maintenance jobs.
    pub fn assignable_engineers(&self) -> RepoResult<Vec<User>> {
        KvRecordRepository::<User, S>::new(self.store).list_where(User::is_assignable)
    }

    pub fn create_job(&self, job: &Job, now: DateTime<Utc>) -> RepoResult<Job> {
        let resolved = self.resolve_names(job.clone())?;
        let stored = self.jobs().create(&resolved)?;
        self.notify(NotificationKind::JobCreated, "New maintenance job", &stored, now)?;
        Ok(stored)
    }

    pub fn update_job(&self, job: &Job, now: DateTime<Utc>) -> RepoResult<Job> {
        let previous = self.require_job(&job.id)?;
        let resolved = self.resolve_names(job.clone())?;
        self.jobs().update(&resolved)?;

        let completed_now =
            resolved.status == JobStatus::Completed && previous.status != JobStatus::Completed;
        let kind = if completed_now {
            NotificationKind::JobCompleted
        } else {
            NotificationKind::JobUpdated
        };
        self.notify(kind, "Maintenance job updated", &resolved, now)?;
        Ok(resolved)
    }

    pub fn set_status(&self, id: &str, status: JobStatus, now: DateTime<Utc>) -> RepoResult<Job> {
        let mut job = self.require_job(id)?;
        job.status = status;
        self.update_job(&job, now)
    }

    pub fn get_job(&self, id: &str) -> RepoResult<Option<Job>> {
        self.jobs().get(id)
    }

    pub fn delete_job(&self, id: &str) -> RepoResult<()> {
        self.jobs().delete(id)
    }

    pub fn list_jobs(&self) -> RepoResult<Vec<Job>> {
        self.jobs().list()
    }

    pub fn list_for_ship(&self, ship_id: &str) -> RepoResult<Vec<Job>> {
        self.jobs().list_where(|job| job.ship_id == ship_id)
    }

    fn require_job(&self, id: &str) -> RepoResult<Job> {
        self.jobs().get(id)?.ok_or_else(|| RepoError::NotFound {
            kind: Job::KIND,
            id: id.to_string(),
        })
    }

    fn resolve_names(&self, mut job: Job) -> RepoResult<Job> {
        job.component_name = KvRecordRepository::<Component, S>::new(self.store)
            .get(&job.component_id)?
            .map(|component| component.name)
            .unwrap_or_default();
        job.assigned_engineer_name = KvRecordRepository::<User, S>::new(self.store)
            .get(&job.assigned_engineer_id)?
            .map(|user| user.display_name().to_string())
            .unwrap_or_default();
        Ok(job)
    }

    fn notify(
        &self,
        kind: NotificationKind,
        title: &str,
        job: &Job,
        now: DateTime<Utc>,
    ) -> RepoResult<()> {
        let subject = if job.component_name.is_empty() {
            job.component_id.as_str()
        } else {
            job.component_name.as_str()
        };
        let message = match &kind {
            NotificationKind::JobCompleted => {
                format!("{} on {subject} completed", job.type_bucket())
            }
            NotificationKind::JobCreated => format!(
                "{} scheduled for {subject} on {}",
                job.type_bucket(),
                job.scheduled_date
            ),
            _ => format!("{} on {subject} is now {}", job.type_bucket(), job.status),
        };

        let mut notification = Notification::new(kind, title, message, now);
        notification.job_id = Some(job.id.clone());
        notification.component_id = Some(job.component_id.clone());
        NotificationService::new(self.store).add(notification)?;
        Ok(())
    }
}
