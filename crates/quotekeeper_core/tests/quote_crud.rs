use quotekeeper_core::db::migrations::latest_version;
use quotekeeper_core::db::open_db_in_memory;
use quotekeeper_core::{
    QuoteDraft, QuoteRepository, QuoteService, QuoteValidationError, RepoError,
    SqliteQuoteRepository,
};
use rusqlite::Connection;

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();

    let draft = QuoteDraft::new("first words", "Ada Lovelace", "Computing");
    let id = repo.insert(&draft).unwrap();
    assert!(id >= 1);

    let loaded = repo.get(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.text, "first words");
    assert_eq!(loaded.author, "Ada Lovelace");
    assert_eq!(loaded.category, "Computing");
}

#[test]
fn insert_assigns_increasing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();

    let first = repo.insert(&QuoteDraft::new("a", "x", "c")).unwrap();
    let second = repo.insert(&QuoteDraft::new("b", "y", "c")).unwrap();
    assert!(second > first);
}

#[test]
fn update_overwrites_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();

    let id = repo
        .insert(&QuoteDraft::new("draft", "Unknown", "Misc"))
        .unwrap();
    repo.update(id, &QuoteDraft::new("polished", "Known", "Wisdom"))
        .unwrap();

    let loaded = repo.get(id).unwrap().unwrap();
    assert_eq!(loaded.text, "polished");
    assert_eq!(loaded.author, "Known");
    assert_eq!(loaded.category, "Wisdom");
}

#[test]
fn update_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();

    let err = repo
        .update(4321, &QuoteDraft::new("body", "author", "category"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(4321)));
}

#[test]
fn delete_removes_exactly_one_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();

    let keep = repo.insert(&QuoteDraft::new("keep", "a", "c")).unwrap();
    let remove = repo.insert(&QuoteDraft::new("remove", "a", "c")).unwrap();

    repo.delete(remove).unwrap();

    assert!(repo.get(remove).unwrap().is_none());
    assert!(repo.get(keep).unwrap().is_some());
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn delete_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();

    let err = repo.delete(99).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));
}

#[test]
fn validation_failure_blocks_insert_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();

    let err = repo.insert(&QuoteDraft::new("", "a", "c")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(QuoteValidationError::EmptyText)
    ));
    assert!(repo.list_all().unwrap().is_empty());

    let id = repo.insert(&QuoteDraft::new("body", "a", "c")).unwrap();
    let err = repo
        .update(id, &QuoteDraft::new("body", "  ", "c"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(QuoteValidationError::EmptyAuthor)
    ));

    let unchanged = repo.get(id).unwrap().unwrap();
    assert_eq!(unchanged.author, "a");
}

#[test]
fn list_all_returns_rows_in_storage_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();

    let ids = [
        repo.insert(&QuoteDraft::new("one", "a", "c")).unwrap(),
        repo.insert(&QuoteDraft::new("two", "b", "c")).unwrap(),
        repo.insert(&QuoteDraft::new("three", "c", "c")).unwrap(),
    ];

    let listed: Vec<_> = repo
        .list_all()
        .unwrap()
        .into_iter()
        .map(|quote| quote.id)
        .collect();
    assert_eq!(listed, ids);
}

#[test]
fn service_reads_back_persisted_state_on_mutation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();
    let service = QuoteService::new(repo);

    let created = service
        .add_quote(&QuoteDraft::new("from service", "a", "c"))
        .unwrap();
    assert!(created.id >= 1);
    assert_eq!(created.text, "from service");

    let updated = service
        .update_quote(created.id, &QuoteDraft::new("edited", "a", "c"))
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.text, "edited");
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteQuoteRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_quotes_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteQuoteRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("quotes"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE quotes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            quote_text TEXT NOT NULL,
            author TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteQuoteRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "quotes",
            column: "category"
        })
    ));
}
