use quotekeeper_core::db::open_db_in_memory;
use quotekeeper_core::{
    AuthError, AuthService, Credentials, CredentialsError, SqliteUserRepository, UserRepository,
};

#[test]
fn sign_up_then_login_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let service = AuthService::new(repo);

    let user_id = service
        .sign_up(&Credentials::new("ada", "enchantress-of-numbers"))
        .unwrap();
    assert!(user_id >= 1);

    let user = service
        .login(&Credentials::new("ada", "enchantress-of-numbers"))
        .unwrap()
        .expect("valid credentials should authenticate");
    assert_eq!(user.id, user_id);
    assert_eq!(user.username, "ada");
}

#[test]
fn login_rejects_wrong_password_and_unknown_user() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let service = AuthService::new(repo);

    service
        .sign_up(&Credentials::new("ada", "right-password"))
        .unwrap();

    assert!(service
        .login(&Credentials::new("ada", "wrong-password"))
        .unwrap()
        .is_none());
    assert!(service
        .login(&Credentials::new("nobody", "right-password"))
        .unwrap()
        .is_none());
}

#[test]
fn duplicate_username_fails_and_first_account_survives() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let service = AuthService::new(repo);

    service
        .sign_up(&Credentials::new("grace", "first-password"))
        .unwrap();

    let err = service
        .sign_up(&Credentials::new("grace", "second-password"))
        .unwrap_err();
    assert!(matches!(err, AuthError::DuplicateUsername(name) if name == "grace"));

    // The original account still authenticates with its original password.
    let user = service
        .login(&Credentials::new("grace", "first-password"))
        .unwrap()
        .expect("first signup should remain retrievable");
    assert_eq!(user.username, "grace");
}

#[test]
fn sign_up_rejects_blank_fields_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let service = AuthService::new(repo);

    let err = service
        .sign_up(&Credentials::new("   ", "password"))
        .unwrap_err();
    assert!(matches!(
        err,
        AuthError::Credentials(CredentialsError::EmptyUsername)
    ));

    let err = service.sign_up(&Credentials::new("ada", "")).unwrap_err();
    assert!(matches!(
        err,
        AuthError::Credentials(CredentialsError::EmptyPassword)
    ));
}

#[test]
fn sign_up_trims_username_before_persistence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let service = AuthService::new(repo);

    service
        .sign_up(&Credentials::new("  ada  ", "password"))
        .unwrap();

    let user = service
        .login(&Credentials::new("ada", "password"))
        .unwrap()
        .expect("trimmed username should authenticate");
    assert_eq!(user.username, "ada");
}

#[test]
fn stored_credential_is_a_salted_hash_not_plaintext() {
    let conn = open_db_in_memory().unwrap();
    {
        let repo = SqliteUserRepository::try_new(&conn).unwrap();
        let service = AuthService::new(repo);
        service
            .sign_up(&Credentials::new("ada", "super-secret"))
            .unwrap();
    }

    let stored: String = conn
        .query_row(
            "SELECT password_hash FROM users WHERE username = 'ada';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_ne!(stored, "super-secret");
    assert!(stored.starts_with("$argon2id$"));
}

#[test]
fn find_by_username_returns_none_for_unknown_account() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    assert!(repo.find_by_username("ghost").unwrap().is_none());
}
