//! Ship use-case service.
//!
//! # Invariants
//! - Deleting a ship never touches its components or jobs.

use crate::model::job::Job;
use crate::model::ship::Ship;
use crate::repo::record_repo::{KvRecordRepository, RecordRepository, RepoError, RepoResult};
use crate::service::component_service::{ComponentService, ComponentView};
use crate::storage::KeyValueStore;
use chrono::NaiveDate;

/// One ship with everything that references it.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipDetail {
    pub ship: Ship,
    pub components: Vec<ComponentView>,
    pub jobs: Vec<Job>,
}

pub struct FleetService<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S: KeyValueStore + ?Sized> FleetService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    fn ships(&self) -> KvRecordRepository<'s, Ship, S> {
        KvRecordRepository::new(self.store)
    }

    pub fn create_ship(&self, ship: &Ship) -> RepoResult<Ship> {
        self.ships().create(ship)
    }

    pub fn update_ship(&self, ship: &Ship) -> RepoResult<()> {
        self.ships().update(ship)
    }

    pub fn get_ship(&self, id: &str) -> RepoResult<Option<Ship>> {
        self.ships().get(id)
    }

    pub fn list_ships(&self) -> RepoResult<Vec<Ship>> {
        self.ships().list()
    }

    pub fn delete_ship(&self, id: &str) -> RepoResult<()> {
        self.ships().delete(id)
    }

    /// Loads a ship together with its components (with maintenance status) and jobs.
    pub fn ship_detail(&self, id: &str, today: NaiveDate) -> RepoResult<ShipDetail> {
        let ship = self.get_ship(id)?.ok_or_else(|| RepoError::NotFound {
            kind: "ship",
            id: id.to_string(),
        })?;
        let components = ComponentService::new(self.store).list_for_ship(id, today)?;
        let jobs = KvRecordRepository::<Job, S>::new(self.store).list_where(|job| job.ship_id == id)?;

        Ok(ShipDetail {
            ship,
            components,
            jobs,
        })
    }
}
