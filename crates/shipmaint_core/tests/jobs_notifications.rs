use chrono::{Duration, NaiveDate, TimeZone, Utc};
use shipmaint_core::db::open_db_in_memory;
use shipmaint_core::{
    calculate_dashboard_stats, seed_sample_data, ComponentService, Job, JobPriority, JobService,
    JobStatus, KeyValueStore, NotificationKind, NotificationService, RepoError,
    SqliteKeyValueStore, StorageError, StorageKey,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn create_job_resolves_names_and_notifies() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    seed_sample_data(&store).unwrap();
    let jobs = JobService::new(&store);
    let now = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();

    let job = Job {
        assigned_engineer_id: "e2".to_string(),
        priority: JobPriority::High,
        job_type: "Emergency Repair".to_string(),
        ..Job::new("s1", "c1", date(2024, 4, 2), "Replace injector")
    };
    let created = jobs.create_job(&job, now).unwrap();

    assert!(created.id.starts_with('j'));
    assert_eq!(created.component_name, "Main Engine");
    assert_eq!(created.assigned_engineer_name, "Engineer");

    let notifications = NotificationService::new(&store).list().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::JobCreated);
    assert_eq!(notifications[0].job_id.as_deref(), Some(created.id.as_str()));
    assert!(!notifications[0].is_read);
}

#[test]
fn unresolved_references_store_empty_names() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let jobs = JobService::new(&store);

    let job = Job {
        assigned_engineer_id: "ghost".to_string(),
        ..Job::new("s9", "c9", date(2024, 4, 2), "Inspect hull")
    };
    let created = jobs.create_job(&job, Utc::now()).unwrap();
    assert_eq!(created.component_name, "");
    assert_eq!(created.assigned_engineer_name, "");
}

#[test]
fn completing_a_job_emits_completed_notification_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    seed_sample_data(&store).unwrap();
    let jobs = JobService::new(&store);
    let now = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();

    jobs.set_status("j1", JobStatus::InProgress, now).unwrap();
    let done = jobs
        .set_status("j1", JobStatus::Completed, now + Duration::hours(2))
        .unwrap();
    assert_eq!(done.status, JobStatus::Completed);

    let notifications = NotificationService::new(&store).list().unwrap();
    let kinds: Vec<_> = notifications.iter().map(|n| n.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![NotificationKind::JobCompleted, NotificationKind::JobUpdated]
    );

    let err = jobs.set_status("j404", JobStatus::Cancelled, now).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { kind: "job", .. }));
}

#[test]
fn assignable_engineers_exclude_admins() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    seed_sample_data(&store).unwrap();

    let engineers = JobService::new(&store).assignable_engineers().unwrap();
    let ids: Vec<_> = engineers.iter().map(|user| user.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2"]);
}

#[test]
fn notification_read_state_management() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    seed_sample_data(&store).unwrap();
    let jobs = JobService::new(&store);
    let notifications = NotificationService::new(&store);
    let now = Utc::now();

    jobs.set_status("j1", JobStatus::InProgress, now).unwrap();
    jobs.set_status("j2", JobStatus::Completed, now).unwrap();
    assert_eq!(notifications.unread_count().unwrap(), 2);

    let first_id = notifications.list().unwrap()[0].id.clone();
    notifications.mark_as_read(&first_id).unwrap();
    assert_eq!(notifications.unread_count().unwrap(), 1);

    assert_eq!(notifications.mark_all_as_read().unwrap(), 1);
    assert_eq!(notifications.unread_count().unwrap(), 0);

    notifications.remove(&first_id).unwrap();
    assert_eq!(notifications.list().unwrap().len(), 1);
    assert!(notifications.mark_as_read("notif_missing").is_err());

    notifications.clear_all().unwrap();
    assert!(notifications.list().unwrap().is_empty());
}

#[test]
fn maintenance_alerts_are_raised_once_per_overdue_component() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    seed_sample_data(&store).unwrap();
    let components = ComponentService::new(&store);
    let now = Utc::now();

    let raised = components.raise_maintenance_alerts(date(2024, 8, 15), now).unwrap();
    assert_eq!(raised.len(), 1);
    assert_eq!(raised[0].component_id.as_deref(), Some("c2"));
    assert_eq!(raised[0].kind, NotificationKind::MaintenanceDue);

    let again = components.raise_maintenance_alerts(date(2024, 8, 15), now).unwrap();
    assert!(again.is_empty());

    // Both components overdue a year later; c2 still has its unread alert.
    let later = components.raise_maintenance_alerts(date(2025, 8, 15), now).unwrap();
    assert_eq!(later.len(), 1);
    assert_eq!(later[0].component_id.as_deref(), Some("c1"));
}

#[test]
fn job_with_unknown_priority_blocks_writes_and_survives() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    seed_sample_data(&store).unwrap();
    let seeded = store.get_item("jobs").unwrap().unwrap();
    let raw = seeded.replacen(r#""priority":"Medium""#, r#""priority":"Urgent""#, 1);
    assert_ne!(raw, seeded);
    store.set_item("jobs", &raw).unwrap();

    let jobs = JobService::new(&store);
    let job = Job {
        assigned_engineer_id: "e2".to_string(),
        ..Job::new("s1", "c1", date(2024, 4, 2), "Replace injector")
    };
    let err = jobs.create_job(&job, Utc::now()).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Storage(StorageError::Malformed {
            key: StorageKey::Jobs,
            ..
        })
    ));
    assert!(jobs.delete_job("j2").is_err());

    assert_eq!(store.get_item("jobs").unwrap().as_deref(), Some(raw.as_str()));
    assert!(NotificationService::new(&store).list().unwrap().is_empty());

    let stats = calculate_dashboard_stats(&store, date(2024, 4, 1)).unwrap();
    assert_eq!(stats.jobs_in_progress, 0);
    assert_eq!(stats.total_ships, 2);
}

#[test]
fn unparseable_notifications_are_not_rewritten() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let raw = r#"[{"id":"notif_1","type":"job_created","message":"m"}]"#;
    store.set_item("notifications", raw).unwrap();
    let notifications = NotificationService::new(&store);

    let err = notifications.mark_all_as_read().unwrap_err();
    assert!(matches!(
        err,
        RepoError::Storage(StorageError::Malformed {
            key: StorageKey::Notifications,
            ..
        })
    ));
    assert_eq!(
        store.get_item("notifications").unwrap().as_deref(),
        Some(raw)
    );
}
