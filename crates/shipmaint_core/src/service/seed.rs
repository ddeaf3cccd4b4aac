//! Sample fleet data installed on first run.
//!
//! # Invariants
//! - A key that already exists is never overwritten, even when it holds an
//!   empty or malformed array.

use crate::model::component::Component;
use crate::model::job::{Job, JobPriority, JobStatus};
use crate::model::ship::{Ship, ShipStatus};
use crate::model::user::{User, UserRole};
use crate::repo::record_repo::RepoResult;
use crate::storage::{save_collection, KeyValueStore, StorageKey};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;

/// Keys written by [`seed_sample_data`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub seeded: Vec<StorageKey>,
}

pub fn seed_sample_data<S: KeyValueStore + ?Sized>(store: &S) -> RepoResult<SeedReport> {
    let mut report = SeedReport::default();
    seed_key(store, StorageKey::Ships, &sample_ships(), &mut report)?;
    seed_key(store, StorageKey::Components, &sample_components(), &mut report)?;
    seed_key(store, StorageKey::Jobs, &sample_jobs(), &mut report)?;
    seed_key(store, StorageKey::Users, &sample_users(), &mut report)?;
    info!(
        "event=seed module=service status=ok seeded_keys={}",
        report.seeded.len()
    );
    Ok(report)
}

fn seed_key<S, T>(store: &S, key: StorageKey, items: &[T], report: &mut SeedReport) -> RepoResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    if store.contains_key(key.as_str())? {
        return Ok(());
    }
    save_collection(store, key, items)?;
    report.seeded.push(key);
    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn sample_ships() -> Vec<Ship> {
    vec![
        Ship {
            id: "s1".to_string(),
            ..Ship::new("Ever Given", "9811000", "Panama")
        },
        Ship {
            id: "s2".to_string(),
            status: ShipStatus::UnderMaintenance,
            ..Ship::new("Maersk Alabama", "9164263", "USA")
        },
    ]
}

pub fn sample_components() -> Vec<Component> {
    vec![
        Component {
            id: "c1".to_string(),
            ..Component::new("s1", "Main Engine", "ME-1234", date(2020, 1, 10), date(2024, 3, 12))
        },
        Component {
            id: "c2".to_string(),
            ..Component::new("s2", "Radar", "RAD-5678", date(2021, 7, 18), date(2023, 12, 1))
        },
    ]
}

pub fn sample_jobs() -> Vec<Job> {
    vec![
        Job {
            id: "j1".to_string(),
            component_name: "Main Engine".to_string(),
            kind: "Routine Check".to_string(),
            job_type: "Preventive Maintenance".to_string(),
            assigned_engineer_id: "e1".to_string(),
            assigned_engineer_name: "Engineer 1".to_string(),
            ..Job::new("s1", "c1", date(2024, 4, 1), "Regular maintenance check of main engine")
        },
        Job {
            id: "j2".to_string(),
            component_name: "Radar".to_string(),
            kind: "Repair".to_string(),
            job_type: "Corrective Maintenance".to_string(),
            priority: JobPriority::High,
            status: JobStatus::InProgress,
            assigned_engineer_id: "e2".to_string(),
            assigned_engineer_name: "Engineer 2".to_string(),
            ..Job::new("s2", "c2", date(2024, 3, 25), "Fix radar signal interference issue")
        },
    ]
}

pub fn sample_users() -> Vec<User> {
    vec![
        User {
            id: "u1".to_string(),
            name: "Admin User".to_string(),
            email: "admin@entnt.in".to_string(),
            password: "admin123".to_string(),
            role: UserRole::Admin,
            specialization: None,
            certification: None,
            experience: None,
        },
        User {
            id: "e1".to_string(),
            name: "Inspector".to_string(),
            email: "inspector@entnt.in".to_string(),
            password: "inspect123".to_string(),
            role: UserRole::Inspector,
            specialization: Some("Quality Control".to_string()),
            certification: Some("Marine Inspector".to_string()),
            experience: Some("10 years".to_string()),
        },
        User {
            id: "e2".to_string(),
            name: "Engineer".to_string(),
            email: "engineer@entnt.in".to_string(),
            password: "engine123".to_string(),
            role: UserRole::Engineer,
            specialization: Some("Marine Systems".to_string()),
            certification: Some("Marine Engineer".to_string()),
            experience: Some("8 years".to_string()),
        },
    ]
}
