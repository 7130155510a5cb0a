//! Data access layer contract tests
//!
//! Every check runs against both the in-memory store and a file-backed
//! SQLite store, so the two adapters cannot drift apart.

use assert_matches::assert_matches;
use crm_hrms::backend::database::{
    Dal, DalError, Document, Filter, OfflineStore, Page, DEFAULT_LIMIT, MAX_LIMIT,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::*;

const MISSING_ID: &str = "5b0c1a8e-8f57-4d8e-9d51-1f3b1c1e9a01";

fn doc(value: Value) -> Document {
    value.as_object().cloned().expect("object literal")
}

async fn check_insert_and_get(dal: &Dal) {
    let id = assert_ok!(
        dal.insert("customers", doc(json!({"name": "Acme", "id": "caller-id"})))
            .await
    );
    assert_ne!(id, "caller-id");

    let record = dal.get_by_id("customers", &id).await.expect("record exists");
    assert_eq!(record.id, id);
    assert_eq!(record.fields["name"], "Acme");
    assert!(!record.fields.contains_key("id"));
    assert_eq!(record.created_at, record.updated_at);

    assert!(dal.get_by_id("customers", MISSING_ID).await.is_none());
    assert!(dal.get_by_id("customers", "not-a-uuid").await.is_none());
    assert!(dal.get_by_id("leads", &id).await.is_none());
}

async fn check_find_and_count(dal: &Dal) {
    for (name, status) in [("A", "active"), ("B", "prospect"), ("C", "active")] {
        assert_ok!(
            dal.insert("contacts", doc(json!({"name": name, "status": status, "rank": 1})))
                .await
        );
    }

    let active = Filter::new().eq("status", "active");
    let names: Vec<Value> = dal
        .find_many("contacts", &active, Page::default())
        .await
        .into_iter()
        .map(|r| r.fields["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("A"), json!("C")]);
    assert_eq!(dal.count("contacts", &active).await, 2);
    assert_eq!(dal.count("contacts", &Filter::new()).await, 3);

    let first = dal.find_one("contacts", &active).await.expect("a match");
    assert_eq!(first.fields["name"], "A");

    let by_number = Filter::new().eq("rank", 1);
    assert_eq!(dal.count("contacts", &by_number).await, 3);
    let by_string = Filter::new().eq("rank", "1");
    assert_eq!(dal.count("contacts", &by_string).await, 0);

    let nothing = Filter::new().eq("status", "churned");
    assert!(dal.find_one("contacts", &nothing).await.is_none());

    let page = dal
        .find_many("contacts", &Filter::new(), Page::new(Some(1), Some(1)))
        .await;
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].fields["name"], "B");

    let past_end = dal
        .find_many("contacts", &Filter::new(), Page::new(Some(10), None))
        .await;
    assert!(past_end.is_empty());
}

async fn check_update(dal: &Dal) {
    let id = assert_ok!(dal.insert("leads", doc(json!({"name": "L", "status": "new"}))).await);
    let before = dal.get_by_id("leads", &id).await.expect("record exists");

    let updated = assert_ok!(
        dal.update_by_id(
            "leads",
            &id,
            doc(json!({"status": "qualified", "created_at": "1999-01-01T00:00:00Z"}))
        )
        .await
    );
    assert!(updated);

    let after = dal.get_by_id("leads", &id).await.expect("record exists");
    assert_eq!(after.fields["status"], "qualified");
    assert_eq!(after.fields["name"], "L");
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);

    let untouched = assert_ok!(
        dal.update_by_id("leads", MISSING_ID, doc(json!({"status": "lost"})))
            .await
    );
    assert!(!untouched);
    assert_eq!(dal.count("leads", &Filter::new().eq("status", "lost")).await, 0);
    assert!(!assert_ok!(
        dal.update_by_id("leads", "garbage", doc(json!({"status": "lost"})))
            .await
    ));
}

async fn check_delete(dal: &Dal) {
    let id = assert_ok!(dal.insert("deals", doc(json!({"name": "D"}))).await);

    assert!(assert_ok!(dal.delete_by_id("deals", &id).await));
    assert!(dal.get_by_id("deals", &id).await.is_none());
    assert!(!assert_ok!(dal.delete_by_id("deals", &id).await));
    assert!(!assert_ok!(dal.delete_by_id("deals", "garbage").await));
}

async fn check_unique_index(dal: &Dal) {
    assert_ok!(dal.insert("users", doc(json!({"email": "a@x.com"}))).await);
    let second = dal.insert("users", doc(json!({"email": "a@x.com"}))).await;
    assert_matches!(second, Err(DalError::DuplicateKey { .. }));
    assert_eq!(dal.count("users", &Filter::new()).await, 1);

    let other = assert_ok!(dal.insert("users", doc(json!({"email": "b@x.com"}))).await);
    let clash = dal
        .update_by_id("users", &other, doc(json!({"email": "a@x.com"})))
        .await;
    assert_matches!(clash, Err(DalError::DuplicateKey { .. }));

    assert_ok!(
        dal.insert("attendance", doc(json!({"employee_id": "E1", "date": "2025-01-01"})))
            .await
    );
    assert_ok!(
        dal.insert("attendance", doc(json!({"employee_id": "E1", "date": "2025-01-02"})))
            .await
    );
    let repeat = dal
        .insert("attendance", doc(json!({"employee_id": "E1", "date": "2025-01-01"})))
        .await;
    assert_matches!(repeat, Err(DalError::DuplicateKey { .. }));
}

async fn check_limit_clamp(dal: &Dal) {
    for i in 0..(MAX_LIMIT + 5) {
        assert_ok!(dal.insert("departments", doc(json!({"seq": i}))).await);
    }

    let capped = dal
        .find_many("departments", &Filter::new(), Page::new(None, Some(5000)))
        .await;
    assert_eq!(capped.len() as u64, MAX_LIMIT);
    assert_eq!(capped[0].fields["seq"], 0);

    let default = dal
        .find_many("departments", &Filter::new(), Page::default())
        .await;
    assert_eq!(default.len() as u64, DEFAULT_LIMIT);

    let tail = dal
        .find_many("departments", &Filter::new(), Page::new(Some(MAX_LIMIT), Some(5000)))
        .await;
    assert_eq!(tail.len(), 5);
}

async fn run_contract(dal: Dal) {
    check_insert_and_get(&dal).await;
    check_find_and_count(&dal).await;
    check_update(&dal).await;
    check_delete(&dal).await;
    check_unique_index(&dal).await;
}

#[tokio::test]
async fn test_memory_store_contract() {
    run_contract(memory_dal().await).await;
}

#[tokio::test]
async fn test_sqlite_store_contract() {
    let db = TestDatabase::new().await;
    assert_eq!(db.dal().backend_name(), "sqlite");
    assert!(db.dal().is_connected().await);
    run_contract(db.dal()).await;
}

#[tokio::test]
async fn test_memory_store_limit_clamp() {
    check_limit_clamp(&memory_dal().await).await;
}

#[tokio::test]
async fn test_sqlite_store_limit_clamp() {
    let db = TestDatabase::new().await;
    check_limit_clamp(&db.dal()).await;
}

#[tokio::test]
async fn test_sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("reopen.sqlite").display());
    let timeout = std::time::Duration::from_secs(5);

    let id = {
        let store = crm_hrms::backend::database::SqliteStore::connect(&url, timeout)
            .await
            .unwrap();
        let dal = Dal::with_store(store.clone());
        let id = dal.insert("employees", doc(json!({"employee_id": "E-9"}))).await.unwrap();
        store.close().await;
        id
    };

    let store = crm_hrms::backend::database::SqliteStore::connect(&url, timeout)
        .await
        .unwrap();
    let record = Dal::with_store(store).get_by_id("employees", &id).await.unwrap();
    assert_eq!(record.fields["employee_id"], "E-9");
}

#[tokio::test]
async fn test_offline_store_degrades_reads_and_fails_writes() {
    let dal = Dal::with_store(OfflineStore::new("test: no database"));

    assert!(!dal.is_connected().await);
    assert_eq!(dal.backend_name(), "offline");
    assert!(dal.get_by_id("customers", MISSING_ID).await.is_none());
    assert!(dal.find_many("customers", &Filter::new(), Page::default()).await.is_empty());
    assert_eq!(dal.count("customers", &Filter::new()).await, 0);

    assert_matches!(
        dal.insert("customers", doc(json!({"name": "A"}))).await,
        Err(DalError::StoreUnavailable(_))
    );
    assert_matches!(
        dal.update_by_id("customers", MISSING_ID, doc(json!({"name": "B"}))).await,
        Err(DalError::StoreUnavailable(_))
    );
    assert_matches!(
        dal.delete_by_id("customers", MISSING_ID).await,
        Err(DalError::StoreUnavailable(_))
    );
}
