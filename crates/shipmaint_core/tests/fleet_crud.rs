use chrono::NaiveDate;
use shipmaint_core::db::open_db_in_memory;
use shipmaint_core::{
    Component, ComponentService, FleetService, Job, JobService, KeyValueStore,
    KvRecordRepository, RecordRepository, RepoError, Ship, ShipStatus, SqliteKeyValueStore,
    StorageError, StorageKey, ValidationError,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn create_assigns_prefixed_id_and_get_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let fleet = FleetService::new(&store);

    let created = fleet
        .create_ship(&Ship::new("Ever Given", "9811000", "Panama"))
        .unwrap();
    assert!(created.id.starts_with('s'));

    let loaded = fleet.get_ship(&created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn update_replaces_fields_and_missing_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let fleet = FleetService::new(&store);

    let mut ship = fleet
        .create_ship(&Ship::new("Maersk Alabama", "9164263", "USA"))
        .unwrap();
    ship.status = ShipStatus::OutOfService;
    fleet.update_ship(&ship).unwrap();
    assert_eq!(
        fleet.get_ship(&ship.id).unwrap().unwrap().status,
        ShipStatus::OutOfService
    );

    ship.id = "s-missing".to_string();
    let err = fleet.update_ship(&ship).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { kind: "ship", .. }));
}

#[test]
fn validation_blocks_writes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let fleet = FleetService::new(&store);

    let err = fleet
        .create_ship(&Ship::new("Ever Given", "98-1100", "Panama"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(ValidationError::InvalidImo(_))));
    assert!(fleet.list_ships().unwrap().is_empty());
}

#[test]
fn explicit_duplicate_id_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let repo = KvRecordRepository::<Ship, _>::new(&store);

    let ship = Ship {
        id: "s1".to_string(),
        ..Ship::new("Ever Given", "9811000", "Panama")
    };
    repo.create(&ship).unwrap();
    let err = repo.create(&ship).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateId { .. }));
}

#[test]
fn deleting_a_ship_does_not_cascade() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let fleet = FleetService::new(&store);
    let components = ComponentService::new(&store);
    let jobs = JobService::new(&store);
    let now = chrono::Utc::now();

    let ship = fleet
        .create_ship(&Ship::new("Ever Given", "9811000", "Panama"))
        .unwrap();
    let component = components
        .create_component(&Component::new(
            ship.id.as_str(),
            "Main Engine",
            "ME-1234",
            date(2020, 1, 10),
            date(2024, 3, 12),
        ))
        .unwrap();
    let job = Job {
        assigned_engineer_id: "e1".to_string(),
        ..Job::new(ship.id.as_str(), component.id.as_str(), date(2024, 4, 1), "Check")
    };
    jobs.create_job(&job, now).unwrap();

    fleet.delete_ship(&ship.id).unwrap();

    assert!(fleet.get_ship(&ship.id).unwrap().is_none());
    assert_eq!(components.list_for_ship(&ship.id, date(2024, 4, 1)).unwrap().len(), 1);
    assert_eq!(jobs.list_for_ship(&ship.id).unwrap().len(), 1);

    let err = fleet.delete_ship(&ship.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn ship_detail_collects_components_and_jobs() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    shipmaint_core::seed_sample_data(&store).unwrap();
    let fleet = FleetService::new(&store);

    let detail = fleet.ship_detail("s2", date(2024, 8, 1)).unwrap();
    assert_eq!(detail.ship.name, "Maersk Alabama");
    assert_eq!(detail.components.len(), 1);
    assert_eq!(detail.components[0].component.name, "Radar");
    assert_eq!(detail.components[0].months_since_maintenance, 8);
    assert_eq!(detail.jobs.len(), 1);

    let err = fleet.ship_detail("s404", date(2024, 8, 1)).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { kind: "ship", .. }));
}

#[test]
fn unparseable_ships_are_never_overwritten_by_writes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let raw = r#"[{"id":"s1","name":"Ever Given","imo":9811000,"flag":"Panama","status":"Active"}]"#;
    store.set_item("ships", raw).unwrap();
    let fleet = FleetService::new(&store);

    let err = fleet
        .create_ship(&Ship::new("B", "1234567", "Malta"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Storage(StorageError::Malformed {
            key: StorageKey::Ships,
            ..
        })
    ));
    assert!(fleet.delete_ship("s1").is_err());
    assert_eq!(store.get_item("ships").unwrap().as_deref(), Some(raw));

    // Reads still degrade to an empty listing.
    assert!(fleet.list_ships().unwrap().is_empty());
}
