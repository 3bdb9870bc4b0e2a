use quotekeeper_core::{
    AppSession, Credentials, QuoteDraft, SessionError, SortOrder,
};

#[test]
fn quote_operations_require_login() {
    let session = AppSession::open_in_memory().unwrap();

    let err = session.quotes().unwrap_err();
    assert!(matches!(err, SessionError::NotLoggedIn));

    let err = session
        .add_quote(&QuoteDraft::new("body", "a", "c"))
        .unwrap_err();
    assert!(matches!(err, SessionError::NotLoggedIn));
}

#[test]
fn login_gate_opens_and_logout_closes_it() {
    let mut session = AppSession::open_in_memory().unwrap();
    session
        .sign_up(&Credentials::new("ada", "password"))
        .unwrap();

    assert!(session
        .login(&Credentials::new("ada", "nope"))
        .unwrap()
        .is_none());
    assert!(session.current_user().is_none());

    let user = session
        .login(&Credentials::new("ada", "password"))
        .unwrap()
        .expect("valid credentials should authenticate");
    assert_eq!(user.username, "ada");
    assert_eq!(session.current_user().map(|u| u.id), Some(user.id));

    assert!(session.quotes().unwrap().is_empty());

    session.logout();
    assert!(session.current_user().is_none());
    assert!(matches!(
        session.quotes().unwrap_err(),
        SessionError::NotLoggedIn
    ));
}

#[test]
fn add_update_delete_scenario_roundtrip() {
    let mut session = logged_in_session();

    let created = session
        .add_quote(&QuoteDraft::new(
            "The only way to do great work is to love what you do.",
            "Steve Jobs",
            "Motivation",
        ))
        .unwrap();
    assert!(created.id >= 1);

    let listed = session.quotes().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].text, created.text);
    assert_eq!(listed[0].author, "Steve Jobs");
    assert_eq!(listed[0].category, "Motivation");

    let mut draft = created.to_draft();
    draft.category = "Work".to_string();
    session.update_quote(created.id, &draft).unwrap();

    let reloaded = session.quote(created.id).unwrap().unwrap();
    assert_eq!(reloaded.text, created.text);
    assert_eq!(reloaded.author, "Steve Jobs");
    assert_eq!(reloaded.category, "Work");

    session.delete_quote(created.id).unwrap();
    assert!(session.quote(created.id).unwrap().is_none());
    assert!(session.quotes().unwrap().is_empty());
}

#[test]
fn browse_flow_refreshes_from_storage_each_call() {
    let mut session = logged_in_session();

    session
        .add_quote(&QuoteDraft::new("stay hungry", "Steve Jobs", "Motivation"))
        .unwrap();
    session
        .add_quote(&QuoteDraft::new("ship it", "Grace Hopper", "Computing"))
        .unwrap();

    assert_eq!(
        session.authors(SortOrder::Ascending).unwrap(),
        vec!["Grace Hopper", "Steve Jobs"]
    );
    assert_eq!(
        session.categories(SortOrder::Descending).unwrap(),
        vec!["Motivation", "Computing"]
    );
    assert_eq!(session.quote_count().unwrap(), 2);
    assert_eq!(session.author_quote_count("Steve Jobs").unwrap(), 1);
    assert_eq!(session.category_quote_count("Computing").unwrap(), 1);

    let hits = session.search("steve").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].author, "Steve Jobs");

    let filtered = session.quotes_by_author("Grace Hopper").unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].text, "ship it");

    let by_category = session.quotes_by_category("Motivation").unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].author, "Steve Jobs");
}

#[test]
fn sign_up_is_available_before_login() {
    let session = AppSession::open_in_memory().unwrap();
    let user_id = session
        .sign_up(&Credentials::new("ada", "password"))
        .unwrap();
    assert!(user_id >= 1);
}

fn logged_in_session() -> AppSession {
    let mut session = AppSession::open_in_memory().unwrap();
    session
        .sign_up(&Credentials::new("ada", "password"))
        .unwrap();
    session
        .login(&Credentials::new("ada", "password"))
        .unwrap()
        .expect("seeded credentials should authenticate");
    session
}
