//! User account record.
//!
//! Passwords are stored and compared in plaintext; this store is not a
//! security boundary.

use super::validation::{require, ValidationError};
use super::{normalize_label, Record};
use crate::storage::StorageKey;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Inspector,
    Engineer,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [Self::Admin, Self::Inspector, Self::Engineer];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Inspector => "Inspector",
            Self::Engineer => "Engineer",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(value);
        Self::ALL
            .into_iter()
            .find(|role| normalize_label(role.as_str()) == wanted)
            .ok_or_else(|| format!("unknown user role `{value}`"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
}

impl User {
    /// Engineers and inspectors can be assigned maintenance jobs.
    pub fn is_assignable(&self) -> bool {
        matches!(self.role, UserRole::Engineer | UserRole::Inspector)
    }

    /// Name shown in job listings; falls back to email.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

impl Record for User {
    const KEY: StorageKey = StorageKey::Users;
    const ID_PREFIX: &'static str = "u";
    const KIND: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.email, "Email")?;
        require(&self.password, "Password")?;
        Ok(())
    }
}
