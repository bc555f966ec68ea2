// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::tempdir;
use vantage::db::{KeyValueStore, MemoryStore, SqliteStore, TRANSACTIONS_KEY};
use vantage::error::{ValidationError, VantageError};
use vantage::models::{
    Category, MAX_AMOUNT, NewTransaction, Transaction, TransactionType, category_meta,
};
use vantage::store::Ledger;

fn new_tx(description: &str, kind: TransactionType, category: Category, amount: Decimal) -> NewTransaction {
    NewTransaction {
        description: description.to_string(),
        amount,
        r#type: kind,
        category,
        date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
    }
}

fn lunch() -> NewTransaction {
    new_tx("Lunch", TransactionType::Expense, Category::Food, dec!(1200))
}

#[test]
fn add_prepends_with_fresh_ids() {
    let kv = MemoryStore::new();
    let mut ledger = Ledger::load(&kv);
    let first = ledger.add(lunch()).unwrap().id.clone();
    let second = ledger
        .add(new_tx("Rent", TransactionType::Expense, Category::Housing, dec!(80000)))
        .unwrap()
        .id
        .clone();
    assert_ne!(first, second);
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.items()[0].id, second);
    assert_eq!(ledger.items()[1].id, first);
    assert!(ledger.items()[0].created_at > 0);
}

#[test]
fn income_is_forced_into_income_category() {
    let kv = MemoryStore::new();
    let mut ledger = Ledger::load(&kv);
    let t = ledger
        .add(new_tx("Salary", TransactionType::Income, Category::Food, dec!(300000)))
        .unwrap();
    assert_eq!(t.category, Category::Income);
}

#[test]
fn invalid_input_is_rejected_before_storing() {
    let kv = MemoryStore::new();
    let mut ledger = Ledger::load(&kv);
    let err = ledger
        .add(new_tx("   ", TransactionType::Expense, Category::Food, dec!(1)))
        .unwrap_err();
    assert!(matches!(
        err,
        VantageError::Validation(ValidationError::EmptyDescription)
    ));
    let err = ledger
        .add(new_tx("Refund", TransactionType::Expense, Category::Food, dec!(-1)))
        .unwrap_err();
    assert!(matches!(
        err,
        VantageError::Validation(ValidationError::NegativeAmount)
    ));
    assert!(ledger.is_empty());
    assert!(kv.get(TRANSACTIONS_KEY).unwrap().is_none());
}

#[test]
fn every_mutation_rewrites_the_blob() {
    let kv = MemoryStore::new();
    let mut ledger = Ledger::load(&kv);
    let id = ledger.add(lunch()).unwrap().id.clone();

    let stored: Vec<Transaction> =
        serde_json::from_str(&kv.get(TRANSACTIONS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored, ledger.items());

    assert!(ledger.delete(&id));
    assert_eq!(kv.get(TRANSACTIONS_KEY).unwrap().unwrap(), "[]");
    assert!(!ledger.delete(&id));
}

#[test]
fn stored_blob_uses_camel_case_field_names() {
    let kv = MemoryStore::new();
    Ledger::load(&kv).add(lunch()).unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&kv.get(TRANSACTIONS_KEY).unwrap().unwrap()).unwrap();
    let obj = raw[0].as_object().unwrap();
    for key in ["id", "description", "amount", "type", "category", "date", "createdAt"] {
        assert!(obj.contains_key(key), "missing {}", key);
    }
    assert_eq!(raw[0]["type"], "expense");
    assert_eq!(raw[0]["date"], "2023-10-01");
    assert!(raw[0]["amount"].is_number());
}

#[test]
fn loads_blob_written_by_the_web_app() {
    let kv = MemoryStore::new();
    kv.put(
        TRANSACTIONS_KEY,
        r#"[{"id":"6f1c","description":"Lunch","amount":1200,"type":"expense","category":"food","date":"2023-10-01","createdAt":1696118400000}]"#,
    )
    .unwrap();
    let ledger = Ledger::load(&kv);
    assert_eq!(ledger.len(), 1);
    let t = ledger.find("6f1c").unwrap();
    assert_eq!(t.amount, dec!(1200));
    assert_eq!(t.created_at, 1_696_118_400_000);
}

#[test]
fn malformed_blob_loads_as_empty() {
    let kv = MemoryStore::new();
    kv.put(TRANSACTIONS_KEY, "{not json").unwrap();
    assert!(Ledger::load(&kv).is_empty());

    kv.put(
        TRANSACTIONS_KEY,
        r#"[{"id":"x","description":"d","amount":1,"type":"expense","category":"pets","date":"2023-10-01","createdAt":1}]"#,
    )
    .unwrap();
    assert!(Ledger::load(&kv).is_empty());

    kv.put(
        TRANSACTIONS_KEY,
        r#"[{"id":"x","description":"d","amount":1,"type":"expense","category":"food","date":"10/01/2023","createdAt":1}]"#,
    )
    .unwrap();
    assert!(Ledger::load(&kv).is_empty());

    // well-formed JSON that breaks record invariants
    for bad in [
        r#"[{"id":"a","description":"d","amount":-500,"type":"expense","category":"food","date":"2023-10-01","createdAt":1},{"id":"b","description":"d","amount":100,"type":"expense","category":"health","date":"2023-10-01","createdAt":2}]"#,
        r#"[{"id":"a","description":"d","amount":100,"type":"income","category":"food","date":"2023-10-01","createdAt":1}]"#,
        r#"[{"id":"a","description":"d","amount":1000000000000000001,"type":"expense","category":"food","date":"2023-10-01","createdAt":1}]"#,
    ] {
        kv.put(TRANSACTIONS_KEY, bad).unwrap();
        assert!(Ledger::load(&kv).is_empty(), "accepted {}", bad);
    }
}

#[test]
fn stored_transaction_checks() {
    let mut t = Ledger::load(&MemoryStore::new())
        .add(lunch())
        .unwrap()
        .clone();
    assert_eq!(t.check(), Ok(()));
    t.amount = dec!(-0.01);
    assert_eq!(t.check(), Err(ValidationError::NegativeAmount));
    t.amount = dec!(5);
    t.r#type = TransactionType::Income;
    assert_eq!(
        t.check(),
        Err(ValidationError::IncomeCategory("food".into()))
    );
}

#[test]
fn amounts_above_limit_are_rejected() {
    let kv = MemoryStore::new();
    let mut ledger = Ledger::load(&kv);
    assert_eq!(MAX_AMOUNT, dec!(1000000000000000000));
    let err = ledger
        .add(new_tx("Yacht", TransactionType::Expense, Category::Transport, dec!(1000000000000000000000000000)))
        .unwrap_err();
    assert!(matches!(
        err,
        VantageError::Validation(ValidationError::AmountTooLarge)
    ));
    assert!(
        ledger
            .add(new_tx("Yacht", TransactionType::Expense, Category::Transport, MAX_AMOUNT))
            .is_ok()
    );
}

#[test]
fn reload_keeps_exact_amounts() {
    let kv = MemoryStore::new();
    let mut ledger = Ledger::load(&kv);
    for amount in [dec!(12345678901234567.89), dec!(0.1), dec!(1200.10), dec!(0.000001)] {
        ledger
            .add(new_tx("Precise", TransactionType::Expense, Category::Health, amount))
            .unwrap();
    }
    let reloaded = Ledger::load(&kv);
    assert_eq!(reloaded.items(), ledger.items());
    assert_eq!(reloaded.items()[3].amount.to_string(), "12345678901234567.89");

    let raw = kv.get(TRANSACTIONS_KEY).unwrap().unwrap();
    assert!(raw.contains("\"amount\":12345678901234567.89"));
}

#[test]
fn write_failure_is_reported_but_change_kept() {
    let kv = MemoryStore::new();
    kv.set_fail_writes(true);
    let mut ledger = Ledger::load(&kv);
    let id = ledger.add(lunch()).unwrap().id.clone();
    assert_eq!(ledger.len(), 1);
    assert!(ledger.persist_error().unwrap().contains("quota"));
    assert!(kv.get(TRANSACTIONS_KEY).unwrap().is_none());

    kv.set_fail_writes(false);
    ledger.delete(&id);
    assert!(ledger.persist_error().is_none());
}

#[test]
fn merge_skips_known_ids() {
    let kv = MemoryStore::new();
    let mut ledger = Ledger::load(&kv);
    let existing = ledger.add(lunch()).unwrap().clone();
    let mut other = existing.clone();
    other.id = "imported".into();
    assert_eq!(ledger.merge(vec![existing, other]), 1);
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.items()[1].id, "imported");
}

#[test]
fn clear_removes_blob() {
    let kv = MemoryStore::new();
    let mut ledger = Ledger::load(&kv);
    ledger.add(lunch()).unwrap();
    ledger.clear().unwrap();
    assert!(ledger.is_empty());
    assert!(kv.get(TRANSACTIONS_KEY).unwrap().is_none());
    assert!(Ledger::load(&kv).is_empty());
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vantage.sqlite");
    let saved = {
        let kv = SqliteStore::open(&path).unwrap();
        let mut ledger = Ledger::load(&kv);
        ledger.add(lunch()).unwrap();
        ledger
            .add(new_tx("Bus", TransactionType::Expense, Category::Transport, dec!(230.5)))
            .unwrap();
        assert!(ledger.persist_error().is_none());
        ledger.items().to_vec()
    };
    let kv = SqliteStore::open(&path).unwrap();
    assert_eq!(Ledger::load(&kv).items(), saved.as_slice());
    assert_eq!(kv.keys().unwrap(), vec![TRANSACTIONS_KEY.to_string()]);
}

#[test]
fn sqlite_put_overwrites_and_remove_deletes() {
    let kv = SqliteStore::open_in_memory().unwrap();
    kv.put("k", "1").unwrap();
    kv.put("k", "2").unwrap();
    assert_eq!(kv.get("k").unwrap().as_deref(), Some("2"));
    kv.remove("k").unwrap();
    assert_eq!(kv.get("k").unwrap(), None);
    kv.remove("missing").unwrap();
}

#[test]
fn category_lookup_fails_loudly_on_unknown_tag() {
    assert_eq!(category_meta("grocery").unwrap().name, "Groceries");
    match category_meta("pets") {
        Err(VantageError::UnknownCategory(tag)) => assert_eq!(tag, "pets"),
        other => panic!("expected unknown category, got {:?}", other),
    }
    assert!("Food".parse::<Category>().is_ok());
}
