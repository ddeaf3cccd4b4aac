use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Form-level validation failure for a record write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is blank after trim. Carries the field label.
    Required(&'static str),
    /// IMO number is not exactly seven digits.
    InvalidImo(String),
    MaintenanceBeforeInstall {
        install_date: NaiveDate,
        last_maintenance_date: NaiveDate,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required(label) => write!(f, "{label} is required"),
            Self::InvalidImo(value) => {
                write!(f, "IMO number must be 7 digits, got `{value}`")
            }
            Self::MaintenanceBeforeInstall {
                install_date,
                last_maintenance_date,
            } => write!(
                f,
                "last maintenance date {last_maintenance_date} cannot be before installation date {install_date}"
            ),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require(value: &str, label: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(label));
    }
    Ok(())
}
