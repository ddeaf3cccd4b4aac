//! Installed component record.

use super::validation::{require, ValidationError};
use super::Record;
use crate::maintenance::MaintenanceStatus;
use crate::storage::StorageKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    /// Weak reference to the owning ship.
    pub ship_id: String,
    pub name: String,
    pub serial_number: String,
    #[serde(with = "super::date")]
    pub install_date: NaiveDate,
    #[serde(with = "super::date")]
    pub last_maintenance_date: NaiveDate,
}

impl Component {
    pub fn new(
        ship_id: impl Into<String>,
        name: impl Into<String>,
        serial_number: impl Into<String>,
        install_date: NaiveDate,
        last_maintenance_date: NaiveDate,
    ) -> Self {
        Self {
            id: String::new(),
            ship_id: ship_id.into(),
            name: name.into(),
            serial_number: serial_number.into(),
            install_date,
            last_maintenance_date,
        }
    }

    /// Derived maintenance state as of `today`.
    pub fn maintenance_status(&self, today: NaiveDate) -> MaintenanceStatus {
        MaintenanceStatus::classify(self.last_maintenance_date, today)
    }
}

impl Record for Component {
    const KEY: StorageKey = StorageKey::Components;
    const ID_PREFIX: &'static str = "c";
    const KIND: &'static str = "component";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "Component name")?;
        require(&self.serial_number, "Serial number")?;
        if self.last_maintenance_date < self.install_date {
            return Err(ValidationError::MaintenanceBeforeInstall {
                install_date: self.install_date,
                last_maintenance_date: self.last_maintenance_date,
            });
        }
        Ok(())
    }
}
