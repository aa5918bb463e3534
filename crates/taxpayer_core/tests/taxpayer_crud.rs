use rusqlite::Connection;
use taxpayer_core::db::open_db_in_memory;
use taxpayer_core::{
    RepoError, SqliteTaxPayerRepository, TaxPayer, TaxPayerField, TaxPayerRepository,
    TaxPayerService, TaxPayerValidationError,
};

fn service(conn: &Connection) -> TaxPayerService<SqliteTaxPayerRepository<'_>> {
    TaxPayerService::new(SqliteTaxPayerRepository::try_new(conn).unwrap())
}

#[test]
fn create_then_list_includes_exact_record() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let tid = service
        .create_taxpayer("TID-100", "Ada", "Lovelace", "12 St James's Square")
        .unwrap();
    assert_eq!(tid, "TID-100");

    let listed = service.list_taxpayers().unwrap();
    assert_eq!(
        listed,
        vec![TaxPayer::new(
            "TID-100",
            "Ada",
            "Lovelace",
            "12 St James's Square"
        )]
    );
}

#[test]
fn list_is_ordered_by_tid() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.create_taxpayer("C", "c", "c", "c").unwrap();
    service.create_taxpayer("A", "a", "a", "a").unwrap();
    service.create_taxpayer("B", "b", "b", "b").unwrap();

    let tids = service
        .list_taxpayers()
        .unwrap()
        .into_iter()
        .map(|taxpayer| taxpayer.tid)
        .collect::<Vec<_>>();
    assert_eq!(tids, vec!["A", "B", "C"]);
    assert_eq!(service.count_taxpayers().unwrap(), 3);
}

#[test]
fn create_with_existing_tid_fails_and_keeps_original() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .create_taxpayer("TID-1", "Grace", "Hopper", "Arlington")
        .unwrap();
    let err = service
        .create_taxpayer("TID-1", "Someone", "Else", "Elsewhere")
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateTid(ref tid) if tid == "TID-1"));

    let stored = service.search_taxpayer("TID-1").unwrap().unwrap();
    assert_eq!(stored.first_name, "Grace");
    assert_eq!(service.count_taxpayers().unwrap(), 1);
}

#[test]
fn create_rejects_blank_fields_before_touching_storage() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .create_taxpayer("TID-2", "Grace", "", "Arlington")
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TaxPayerValidationError::EmptyField(
            TaxPayerField::LastName
        ))
    ));
    assert_eq!(service.count_taxpayers().unwrap(), 0);
}

#[test]
fn search_returns_latest_values_or_none() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .create_taxpayer("TID-3", "Alan", "Turing", "Bletchley")
        .unwrap();
    assert!(service
        .update_taxpayer("TID-3", "Alan M.", "Turing", "Wilmslow")
        .unwrap());

    let found = service.search_taxpayer("TID-3").unwrap();
    assert_eq!(
        found,
        Some(TaxPayer::new("TID-3", "Alan M.", "Turing", "Wilmslow"))
    );
    assert_eq!(service.search_taxpayer("TID-404").unwrap(), None);
}

#[test]
fn update_changes_mutable_fields_and_list_reflects_them() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .create_taxpayer("TID-4", "Katherine", "Johnson", "White Sulphur Springs")
        .unwrap();
    service
        .create_taxpayer("TID-5", "Dorothy", "Vaughan", "Kansas City")
        .unwrap();

    let updated = service
        .update_taxpayer("TID-4", "Katherine G.", "Goble", "Hampton")
        .unwrap();
    assert!(updated);

    let listed = service.list_taxpayers().unwrap();
    assert_eq!(
        listed,
        vec![
            TaxPayer::new("TID-4", "Katherine G.", "Goble", "Hampton"),
            TaxPayer::new("TID-5", "Dorothy", "Vaughan", "Kansas City"),
        ]
    );
}

#[test]
fn update_missing_tid_returns_false_and_store_is_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .create_taxpayer("TID-6", "Mary", "Jackson", "Hampton")
        .unwrap();
    let before = service.list_taxpayers().unwrap();

    let updated = service
        .update_taxpayer("TID-missing", "X", "Y", "Z")
        .unwrap();
    assert!(!updated);
    assert_eq!(service.list_taxpayers().unwrap(), before);
}

#[test]
fn repository_update_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaxPayerRepository::try_new(&conn).unwrap();

    let missing = TaxPayer::new("TID-7", "A", "B", "C");
    let err = repo.update_taxpayer(&missing).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ref tid) if tid == "TID-7"));
}

#[test]
fn update_rejects_blank_fields_and_keeps_row() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .create_taxpayer("TID-8", "Hedy", "Lamarr", "Vienna")
        .unwrap();
    let err = service
        .update_taxpayer("TID-8", "Hedy", "Lamarr", "  ")
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let stored = service.search_taxpayer("TID-8").unwrap().unwrap();
    assert_eq!(stored.address, "Vienna");
}

#[test]
fn read_path_rejects_invalid_persisted_rows() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO taxpayers (tid, first_name, last_name, address)
         VALUES ('TID-9', '', 'Curie', 'Paris');",
        [],
    )
    .unwrap();

    let repo = SqliteTaxPayerRepository::try_new(&conn).unwrap();
    let err = repo.get_taxpayer("TID-9").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_requires_migrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteTaxPayerRepository::try_new(&conn)
        .err()
        .expect("unmigrated connection must be rejected");
    assert!(matches!(err, RepoError::InvalidData(_)));
}
