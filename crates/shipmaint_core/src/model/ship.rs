//! Ship record.

use super::validation::{require, ValidationError};
use super::{normalize_label, Record};
use crate::storage::StorageKey;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static IMO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{7}$").expect("valid IMO regex"));

/// Operational state of a ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipStatus {
    #[default]
    Active,
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
    #[serde(rename = "Out of Service")]
    OutOfService,
}

impl ShipStatus {
    pub const ALL: [ShipStatus; 3] = [Self::Active, Self::UnderMaintenance, Self::OutOfService];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::UnderMaintenance => "Under Maintenance",
            Self::OutOfService => "Out of Service",
        }
    }
}

impl Display for ShipStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(value);
        Self::ALL
            .into_iter()
            .find(|status| normalize_label(status.as_str()) == wanted)
            .ok_or_else(|| format!("unknown ship status `{value}`"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    pub id: String,
    pub name: String,
    /// Seven-digit IMO number, kept as text to preserve leading zeros.
    pub imo: String,
    /// Flag state.
    pub flag: String,
    #[serde(default)]
    pub status: ShipStatus,
}

impl Ship {
    /// Creates an active ship with an empty id; the repository assigns one.
    pub fn new(name: impl Into<String>, imo: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            imo: imo.into(),
            flag: flag.into(),
            status: ShipStatus::Active,
        }
    }
}

impl Record for Ship {
    const KEY: StorageKey = StorageKey::Ships;
    const ID_PREFIX: &'static str = "s";
    const KIND: &'static str = "ship";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "Ship name")?;
        require(&self.imo, "IMO number")?;
        if !IMO_RE.is_match(self.imo.trim()) {
            return Err(ValidationError::InvalidImo(self.imo.clone()));
        }
        require(&self.flag, "Flag country")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Ship, ShipStatus};
    use crate::model::{Record, ValidationError};

    #[test]
    fn deserializes_browser_shape() {
        let ship: Ship = serde_json::from_str(
            r#"{"id":"s2","name":"Maersk Alabama","imo":"9164263","flag":"USA","status":"Under Maintenance"}"#,
        )
        .unwrap();
        assert_eq!(ship.status, ShipStatus::UnderMaintenance);
        assert_eq!(ship.imo, "9164263");
    }

    #[test]
    fn missing_status_defaults_to_active() {
        let ship: Ship =
            serde_json::from_str(r#"{"id":"s9","name":"A","imo":"1234567","flag":"NO"}"#).unwrap();
        assert_eq!(ship.status, ShipStatus::Active);
    }

    #[test]
    fn validation_requires_seven_digit_imo() {
        let mut ship = Ship::new("Ever Given", "981100", "Panama");
        assert!(matches!(ship.validate(), Err(ValidationError::InvalidImo(_))));

        ship.imo = "98110001".to_string();
        assert!(matches!(ship.validate(), Err(ValidationError::InvalidImo(_))));

        ship.imo = "   ".to_string();
        assert_eq!(ship.validate(), Err(ValidationError::Required("IMO number")));

        ship.imo = "9811000".to_string();
        assert!(ship.validate().is_ok());
    }

    #[test]
    fn validation_requires_name_and_flag() {
        let ship = Ship::new(" ", "9811000", "Panama");
        assert_eq!(ship.validate(), Err(ValidationError::Required("Ship name")));
        let ship = Ship::new("Ever Given", "9811000", "");
        assert_eq!(ship.validate(), Err(ValidationError::Required("Flag country")));
    }

    #[test]
    fn status_parses_loose_labels() {
        assert_eq!("out-of-service".parse::<ShipStatus>().unwrap(), ShipStatus::OutOfService);
        assert_eq!("active".parse::<ShipStatus>().unwrap(), ShipStatus::Active);
        assert!("sunk".parse::<ShipStatus>().is_err());
    }
}
