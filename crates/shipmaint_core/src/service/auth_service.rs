//! Login session service.
//!
//! Credentials are compared in plaintext. This gate exists to pick the
//! acting role, not to protect data.

use crate::model::user::{User, UserRole};
use crate::repo::record_repo::{KvRecordRepository, RecordRepository, RepoError};
use crate::storage::{load_value, save_value, KeyValueStore, StorageError, StorageKey};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum AuthError {
    InvalidCredentials,
    NotLoggedIn,
    Forbidden { required: UserRole, actual: UserRole },
    Repo(RepoError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::NotLoggedIn => write!(f, "no user is logged in"),
            Self::Forbidden { required, actual } => {
                write!(f, "role {actual} is not allowed; {required} required")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AuthError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<StorageError> for AuthError {
    fn from(value: StorageError) -> Self {
        Self::Repo(RepoError::Storage(value))
    }
}

pub struct AuthService<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S: KeyValueStore + ?Sized> AuthService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Matches email and password exactly, then persists the user as the
    /// current session.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = KvRecordRepository::<User, S>::new(self.store)
            .list()?
            .into_iter()
            .find(|user| user.email == email && user.password == password);

        let Some(user) = user else {
            warn!("event=login module=auth status=error error_code=invalid_credentials");
            return Err(AuthError::InvalidCredentials);
        };

        save_value(self.store, StorageKey::CurrentUser, &user)?;
        info!(
            "event=login module=auth status=ok user_id={} role={}",
            user.id, user.role
        );
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove_item(StorageKey::CurrentUser.as_str())?;
        info!("event=logout module=auth status=ok");
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(load_value(self.store, StorageKey::CurrentUser)?)
    }

    /// Returns the current user when it holds `role`.
    pub fn require_role(&self, role: UserRole) -> Result<User, AuthError> {
        let user = self.current_user()?.ok_or(AuthError::NotLoggedIn)?;
        if user.role != role {
            return Err(AuthError::Forbidden {
                required: role,
                actual: user.role,
            });
        }
        Ok(user)
    }
}
