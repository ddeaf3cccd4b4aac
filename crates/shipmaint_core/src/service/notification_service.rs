//! Notification use-case service.
//!
//! # Invariants
//! - The collection is kept newest first; `add` prepends.
//! - Read-state changes on unknown ids are reported as `NotFound`.

use crate::model::new_record_id;
use crate::model::notification::Notification;
use crate::model::Record;
use crate::repo::record_repo::{KvRecordRepository, RecordRepository, RepoError, RepoResult};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};

pub struct NotificationService<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S: KeyValueStore + ?Sized> NotificationService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    fn notifications(&self) -> KvRecordRepository<'s, Notification, S> {
        KvRecordRepository::new(self.store)
    }

    /// Newest first.
    pub fn list(&self) -> RepoResult<Vec<Notification>> {
        self.notifications().list()
    }

    /// Prepends a notification, assigning an id when blank.
    pub fn add(&self, notification: Notification) -> RepoResult<Notification> {
        let repo = self.notifications();
        let mut all = repo.load_for_write()?;
        let mut stored = notification;
        if stored.id.trim().is_empty() {
            stored.id = new_record_id(Notification::ID_PREFIX);
        }
        all.insert(0, stored.clone());
        repo.replace_all(&all)?;
        Ok(stored)
    }

    pub fn remove(&self, id: &str) -> RepoResult<()> {
        self.notifications().delete(id)
    }

    pub fn mark_as_read(&self, id: &str) -> RepoResult<()> {
        let repo = self.notifications();
        let mut notification = repo.get(id)?.ok_or_else(|| RepoError::NotFound {
            kind: Notification::KIND,
            id: id.to_string(),
        })?;
        notification.is_read = true;
        repo.update(&notification)
    }

    /// Returns how many notifications changed state.
    pub fn mark_all_as_read(&self) -> RepoResult<usize> {
        let repo = self.notifications();
        let mut all = repo.load_for_write()?;
        let mut changed = 0;
        for notification in all.iter_mut().filter(|n| !n.is_read) {
            notification.is_read = true;
            changed += 1;
        }
        repo.replace_all(&all)?;
        Ok(changed)
    }

    pub fn clear_all(&self) -> RepoResult<()> {
        self.notifications().replace_all(&[])
    }

    pub fn unread_count(&self) -> RepoResult<usize> {
        Ok(self.list()?.iter().filter(|n| !n.is_read).count())
    }
}

/// Human-friendly age of a notification relative to `now`.
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 60 {
        format!("{} minutes ago", minutes.max(0))
    } else if hours < 24 {
        format!("{hours} hours ago")
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        format!("{days} days ago")
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}
