use shipmaint_core::db::open_db_in_memory;
use shipmaint_core::{seed_sample_data, AuthError, AuthService, SqliteKeyValueStore, UserRole};

#[test]
fn login_persists_session_and_logout_clears_it() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    seed_sample_data(&store).unwrap();
    let auth = AuthService::new(&store);

    let user = auth.login("admin@entnt.in", "admin123").unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(auth.current_user().unwrap().unwrap().id, "u1");
    assert_eq!(auth.require_role(UserRole::Admin).unwrap().id, "u1");

    auth.logout().unwrap();
    assert!(auth.current_user().unwrap().is_none());
    assert!(matches!(
        auth.require_role(UserRole::Admin),
        Err(AuthError::NotLoggedIn)
    ));
}

#[test]
fn wrong_password_is_rejected_and_session_untouched() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    seed_sample_data(&store).unwrap();
    let auth = AuthService::new(&store);

    let err = auth.login("admin@entnt.in", "Admin123").unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(auth.current_user().unwrap().is_none());
}

#[test]
fn non_admin_is_forbidden() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    seed_sample_data(&store).unwrap();
    let auth = AuthService::new(&store);

    auth.login("engineer@entnt.in", "engine123").unwrap();
    let err = auth.require_role(UserRole::Admin).unwrap_err();
    assert!(matches!(
        err,
        AuthError::Forbidden {
            required: UserRole::Admin,
            actual: UserRole::Engineer
        }
    ));
}

#[test]
fn email_must_match_exactly() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    seed_sample_data(&store).unwrap();
    let auth = AuthService::new(&store);

    for email in ["Admin@ENTNT.in", " admin@entnt.in", "admin@entnt.in "] {
        let err = auth.login(email, "admin123").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
    assert!(auth.current_user().unwrap().is_none());
}
