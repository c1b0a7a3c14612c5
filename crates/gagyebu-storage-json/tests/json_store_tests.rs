use std::fs;

use chrono::NaiveDate;
use gagyebu_core::{CoreError, EntryService, EntryStore, FixedClock};
use gagyebu_domain::{EntryDraft, EntryId, EntryKind, YearMonth};
use gagyebu_storage_json::JsonEntryStore;
use tempfile::tempdir;

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("date")
}

#[test]
fn entries_survive_reopening_the_store() {
    let dir = tempdir().expect("tempdir");
    let clock = FixedClock::at_date(date("2025-01-05"));

    let created = {
        let store = JsonEntryStore::open(dir.path(), "home").expect("open store");
        EntryService::create(
            &store,
            &clock,
            EntryDraft::new(date("2025-01-05"), EntryKind::Expense, "식비", 12_000)
                .with_memo("장보기"),
        )
        .expect("create entry")
    };

    let reopened = JsonEntryStore::open(dir.path(), "home").expect("reopen store");
    assert_eq!(reopened.all().expect("all"), vec![created.clone()]);
    assert_eq!(reopened.get(&created.id).expect("get"), Some(created));
    assert!(dir.path().join("ledgers").join("home.json").exists());
}

#[test]
fn missing_file_is_an_empty_ledger() {
    let dir = tempdir().expect("tempdir");
    let store = JsonEntryStore::open(dir.path(), "fresh").expect("open store");
    assert!(store.all().expect("all").is_empty());
    assert!(!store.path().exists());
}

#[test]
fn loads_entries_written_in_the_browser_schema() {
    let dir = tempdir().expect("tempdir");
    let store = JsonEntryStore::open(dir.path(), "legacy").expect("open store");
    fs::write(
        store.path(),
        r#"[
            {"id":"m5x2a9k3","date":"2025-01-05","type":"expense","category":"식비","amount":30000,"memo":"","createdAt":1736035200000},
            {"id":"m5x2b1c7","date":"2025-01-10","type":"income","category":"아빠 월급여","amount":500000,"createdAt":1736467200000}
        ]"#,
    )
    .expect("write legacy file");

    let january: YearMonth = "2025-01".parse().unwrap();
    let entries = store.query_by_month(january).expect("query");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, EntryId::new("m5x2a9k3"));
    assert_eq!(entries[1].kind, EntryKind::Income);
    assert_eq!(entries[1].memo, "");
    assert_eq!(store.query_by_date(date("2025-01-10")).unwrap().len(), 1);
}

#[test]
fn malformed_file_is_reported_and_left_untouched() {
    let dir = tempdir().expect("tempdir");
    let store = JsonEntryStore::open(dir.path(), "broken").expect("open store");
    fs::write(store.path(), "{ not json").expect("write");

    assert!(matches!(store.all(), Err(CoreError::Serde(_))));
    let draft = EntryDraft::new(date("2025-02-01"), EntryKind::Expense, "기타", 1);
    let clock = FixedClock::at_date(date("2025-02-01"));
    assert!(EntryService::create(&store, &clock, draft).is_err());
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
}

#[test]
fn update_and_delete_rewrite_the_file() {
    let dir = tempdir().expect("tempdir");
    let store = JsonEntryStore::open(dir.path(), "home").expect("open store");
    let clock = FixedClock::at_date(date("2025-03-01"));
    let first = EntryService::create(
        &store,
        &clock,
        EntryDraft::new(date("2025-03-01"), EntryKind::Expense, "식비", 1_000),
    )
    .unwrap();
    let second = EntryService::create(
        &store,
        &clock,
        EntryDraft::new(date("2025-03-02"), EntryKind::Expense, "의료비", 2_000),
    )
    .unwrap();

    let updated = EntryService::update(
        &store,
        &first.id,
        EntryDraft::new(date("2025-03-01"), EntryKind::Expense, "식비", 1_500),
    )
    .unwrap();
    EntryService::delete(&store, &second.id).unwrap();

    let reopened = JsonEntryStore::open(dir.path(), "home").unwrap();
    assert_eq!(reopened.all().unwrap(), vec![updated]);
    assert!(matches!(
        reopened.remove(&second.id),
        Err(CoreError::EntryNotFound(_))
    ));
    assert!(!dir.path().join("ledgers").join("home.json.tmp").exists());
}

#[test]
fn duplicate_ids_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let store = JsonEntryStore::open(dir.path(), "home").expect("open store");
    let clock = FixedClock::at_date(date("2025-03-01"));
    let entry = EntryService::create(
        &store,
        &clock,
        EntryDraft::new(date("2025-03-01"), EntryKind::Income, "엄마 월급여", 10),
    )
    .unwrap();
    assert!(matches!(store.insert(entry), Err(CoreError::Validation(_))));
    assert_eq!(store.all().unwrap().len(), 1);
}
