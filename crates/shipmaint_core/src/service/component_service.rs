//! Component use-case service.
//!
//! # Responsibility
//! - CRUD for installed components.
//! - Attach derived maintenance status to listings.
//! - Raise `maintenance_due` notifications for overdue components.

use crate::maintenance::{elapsed_months, MaintenanceStatus};
use crate::model::component::Component;
use crate::model::notification::{Notification, NotificationKind};
use crate::repo::record_repo::{KvRecordRepository, RecordRepository, RepoResult};
use crate::service::notification_service::NotificationService;
use crate::storage::KeyValueStore;
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use std::collections::HashSet;

/// Component listing row with derived maintenance state.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentView {
    pub component: Component,
    pub months_since_maintenance: i32,
    pub maintenance_status: MaintenanceStatus,
}

impl ComponentView {
    pub fn derive(component: Component, today: NaiveDate) -> Self {
        let months = elapsed_months(component.last_maintenance_date, today);
        Self {
            component,
            months_since_maintenance: months,
            maintenance_status: MaintenanceStatus::from_elapsed_months(months),
        }
    }
}

pub struct ComponentService<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S: KeyValueStore + ?Sized> ComponentService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    fn components(&self) -> KvRecordRepository<'s, Component, S> {
        KvRecordRepository::new(self.store)
    }

    pub fn create_component(&self, component: &Component) -> RepoResult<Component> {
        self.components().create(component)
    }

    pub fn update_component(&self, component: &Component) -> RepoResult<()> {
        self.components().update(component)
    }

    pub fn get_component(&self, id: &str) -> RepoResult<Option<Component>> {
        self.components().get(id)
    }

    pub fn delete_component(&self, id: &str) -> RepoResult<()> {
        self.components().delete(id)
    }

    pub fn list_for_ship(&self, ship_id: &str, today: NaiveDate) -> RepoResult<Vec<ComponentView>> {
        Ok(self
            .components()
            .list_where(|component| component.ship_id == ship_id)?
            .into_iter()
            .map(|component| ComponentView::derive(component, today))
            .collect())
    }

    pub fn list_all(&self, today: NaiveDate) -> RepoResult<Vec<ComponentView>> {
        Ok(self
            .components()
            .list()?
            .into_iter()
            .map(|component| ComponentView::derive(component, today))
            .collect())
    }

    /// Adds one `maintenance_due` notification per overdue component that has
    /// no unread alert yet. Returns the notifications added.
    pub fn raise_maintenance_alerts(
        &self,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Notification>> {
        let notifications = NotificationService::new(self.store);
        let already_alerted: HashSet<String> = notifications
            .list()?
            .into_iter()
            .filter(|n| n.kind == NotificationKind::MaintenanceDue && !n.is_read)
            .filter_map(|n| n.component_id)
            .collect();

        let mut raised = Vec::new();
        for view in self.list_all(today)? {
            if view.maintenance_status != MaintenanceStatus::Overdue
                || already_alerted.contains(&view.component.id)
            {
                continue;
            }

            let mut alert = Notification::new(
                NotificationKind::MaintenanceDue,
                "Maintenance overdue",
                format!(
                    "{} ({}) was last serviced {} months ago",
                    view.component.name,
                    view.component.serial_number,
                    view.months_since_maintenance
                ),
                now,
            );
            alert.component_id = Some(view.component.id.clone());
            raised.push(notifications.add(alert)?);
        }

        info!(
            "event=maintenance_alerts module=service status=ok raised={}",
            raised.len()
        );
        Ok(raised)
    }
}
