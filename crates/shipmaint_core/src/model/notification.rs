//! In-app notification record.

use super::Record;
use crate::storage::StorageKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored as the snake_case `type` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationKind {
    JobCreated,
    JobUpdated,
    JobCompleted,
    MaintenanceDue,
    ComponentAlert,
    /// Unrecognized `type`, kept verbatim so rewrites do not lose it.
    Other(String),
}

impl NotificationKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::JobCreated => "job_created",
            Self::JobUpdated => "job_updated",
            Self::JobCompleted => "job_completed",
            Self::MaintenanceDue => "maintenance_due",
            Self::ComponentAlert => "component_alert",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for NotificationKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "job_created" => Self::JobCreated,
            "job_updated" => Self::JobUpdated,
            "job_completed" => Self::JobCompleted,
            "maintenance_due" => Self::MaintenanceDue,
            "component_alert" => Self::ComponentAlert,
            _ => Self::Other(value),
        }
    }
}

impl From<NotificationKind> for String {
    fn from(value: NotificationKind) -> Self {
        match value {
            NotificationKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
}

impl Notification {
    /// Creates an unread notification stamped `now`.
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: String::new(),
            kind,
            title: title.into(),
            message: message.into(),
            job_id: None,
            component_id: None,
            timestamp: now,
            is_read: false,
        }
    }
}

impl Record for Notification {
    const KEY: StorageKey = StorageKey::Notifications;
    const ID_PREFIX: &'static str = "notif_";
    const KIND: &'static str = "notification";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::{Notification, NotificationKind};

    #[test]
    fn unknown_type_is_kept_verbatim() {
        let notification: Notification = serde_json::from_str(
            r#"{"id":"notif_1","type":"system_broadcast","title":"Hi","message":"m","timestamp":"2024-03-01T10:00:00Z","isRead":false}"#,
        )
        .unwrap();
        assert_eq!(
            notification.kind,
            NotificationKind::Other("system_broadcast".to_string())
        );
        assert!(notification.job_id.is_none());

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["type"], "system_broadcast");
    }

    #[test]
    fn known_types_serialize_snake_case() {
        let json = serde_json::to_value(NotificationKind::MaintenanceDue).unwrap();
        assert_eq!(json, "maintenance_due");
        let kind: NotificationKind = serde_json::from_str("\"job_completed\"").unwrap();
        assert_eq!(kind, NotificationKind::JobCompleted);
    }
}
