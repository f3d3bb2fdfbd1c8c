//! Integration tests for caltrack-store
//!
//! These tests verify the full CRUD cycle against a real on-disk journal.

use std::fs;
use std::io::Write;

use caltrack_domain::{
    DateRange, Journal, JournalError, Meal, Record, RecordId, RecordKind,
};
use caltrack_store::{FileJournal, MemoryJournal};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use tempfile::TempDir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn food(date: NaiveDate, description: &str, kcal: u32) -> Record {
    Record::Food {
        id: RecordId::new(),
        date,
        meal: Meal::Lunch,
        description: description.to_string(),
        kcal,
    }
}

fn journal_in(dir: &TempDir) -> FileJournal {
    FileJournal::new(dir.path().join("entries.ndjson"))
}

#[test]
fn test_append_then_read_all_round_trips() {
    let dir = TempDir::new().unwrap();
    let mut journal = journal_in(&dir);

    let record = food(day(2025, 6, 1), "salad", 400);
    journal.append(record.clone()).unwrap();

    let records = journal.read_all().unwrap();
    assert_eq!(records, vec![record]);
}

#[test]
fn test_read_all_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut journal = journal_in(&dir);
    journal.append(food(day(2025, 6, 1), "salad", 400)).unwrap();
    journal.append(food(day(2025, 6, 2), "soup", 250)).unwrap();

    let first = journal.read_all().unwrap();
    let second = journal.read_all().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_read_all_is_always_fresh() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("entries.ndjson");
    let mut writer = FileJournal::new(&path);
    let reader = FileJournal::new(&path);

    assert!(reader.read_all().unwrap().is_empty());
    writer.append(food(day(2025, 6, 1), "salad", 400)).unwrap();
    // A different handle sees the write immediately: no caching anywhere
    assert_eq!(reader.read_all().unwrap().len(), 1);
}

#[test]
fn test_missing_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let journal = journal_in(&dir);
    assert!(journal.read_all().unwrap().is_empty());
}

#[test]
fn test_malformed_and_blank_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("entries.ndjson");
    let mut journal = FileJournal::new(&path);
    journal.append(food(day(2025, 6, 1), "salad", 400)).unwrap();

    let mut raw = fs::OpenOptions::new().append(true).open(&path).unwrap();
    writeln!(raw).unwrap();
    writeln!(raw, "this is not json").unwrap();
    writeln!(raw, r#"{{"type":"medication","id":"x"}}"#).unwrap();
    writeln!(raw, "   ").unwrap();
    drop(raw);

    journal.append(food(day(2025, 6, 2), "soup", 250)).unwrap();

    let records = journal.read_all().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].label(), "salad");
    assert_eq!(records[1].label(), "soup");
}

#[test]
fn test_update_merges_only_named_fields() {
    let dir = TempDir::new().unwrap();
    let mut journal = journal_in(&dir);
    let record = food(day(2025, 6, 1), "salad", 400);
    let id = record.id();
    journal.append(record).unwrap();

    let mut changes = Map::new();
    changes.insert("kcal".to_string(), Value::from(450));
    let updated = journal.update(id, None, &changes).unwrap();

    match updated {
        Record::Food {
            meal,
            description,
            kcal,
            date,
            ..
        } => {
            assert_eq!(kcal, 450);
            assert_eq!(meal, Meal::Lunch);
            assert_eq!(description, "salad");
            assert_eq!(date, day(2025, 6, 1));
        }
        other => panic!("update changed the record type: {:?}", other),
    }

    // The rewrite persisted exactly the merged record
    let records = journal.read_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id(), id);
}

#[test]
fn test_update_unknown_id_is_not_found() {
    let dir = TempDir::new().unwrap();
    let mut journal = journal_in(&dir);
    journal.append(food(day(2025, 6, 1), "salad", 400)).unwrap();

    let changes = Map::new();
    let missing = RecordId::new();
    assert!(matches!(
        journal.update(missing, None, &changes),
        Err(JournalError::NotFound(id)) if id == missing
    ));
}

#[test]
fn test_update_kind_hint_rejects_wrong_type() {
    let dir = TempDir::new().unwrap();
    let mut journal = journal_in(&dir);
    let record = food(day(2025, 6, 1), "salad", 400);
    let id = record.id();
    journal.append(record).unwrap();

    let changes = Map::new();
    assert!(matches!(
        journal.update(id, Some(RecordKind::Weight), &changes),
        Err(JournalError::NotFound(_))
    ));
}

#[test]
fn test_delete_removes_and_second_delete_fails() {
    let dir = TempDir::new().unwrap();
    let mut journal = journal_in(&dir);
    let keep = food(day(2025, 6, 1), "salad", 400);
    let gone = food(day(2025, 6, 2), "soup", 250);
    let gone_id = gone.id();
    journal.append(keep.clone()).unwrap();
    journal.append(gone).unwrap();

    journal.delete(gone_id).unwrap();
    assert_eq!(journal.read_all().unwrap(), vec![keep.clone()]);

    assert!(matches!(
        journal.delete(gone_id),
        Err(JournalError::NotFound(_))
    ));
    // The failed delete left the store unchanged
    assert_eq!(journal.read_all().unwrap(), vec![keep]);
}

#[test]
fn test_rewrite_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("entries.ndjson");
    let mut journal = FileJournal::new(&path);
    let record = food(day(2025, 6, 1), "salad", 400);
    let id = record.id();
    journal.append(record).unwrap();

    journal.delete(id).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn test_list_filters_by_kind_and_range() {
    let dir = TempDir::new().unwrap();
    let mut journal = journal_in(&dir);
    journal.append(food(day(2025, 6, 1), "salad", 400)).unwrap();
    journal.append(food(day(2025, 6, 5), "soup", 250)).unwrap();
    journal
        .append(Record::Weight {
            id: RecordId::new(),
            ts: "2025-06-01T07:00:00Z".parse().unwrap(),
            kg: 81.0,
        })
        .unwrap();

    let range = DateRange {
        start: day(2025, 6, 1),
        end: day(2025, 6, 2),
    };
    let foods = journal.list(Some(RecordKind::Food), Some(range)).unwrap();
    assert_eq!(foods.len(), 1);
    assert_eq!(foods[0].label(), "salad");

    let weights = journal.list(Some(RecordKind::Weight), None).unwrap();
    assert_eq!(weights.len(), 1);
}

#[test]
fn test_list_on_inverted_range_is_empty() {
    let dir = TempDir::new().unwrap();
    let mut journal = journal_in(&dir);
    journal.append(food(day(2025, 6, 3), "salad", 400)).unwrap();

    let inverted = DateRange {
        start: day(2025, 6, 10),
        end: day(2025, 6, 1),
    };
    assert!(journal.list(None, Some(inverted)).unwrap().is_empty());
}

#[test]
fn test_memory_journal_matches_file_contract() {
    let mut journal = MemoryJournal::new();
    let record = food(day(2025, 6, 1), "salad", 400);
    let id = record.id();
    journal.append(record).unwrap();

    let mut changes = Map::new();
    changes.insert("description".to_string(), Value::from("caesar salad"));
    let updated = journal.update(id, Some(RecordKind::Food), &changes).unwrap();
    assert_eq!(updated.label(), "caesar salad");

    journal.delete(id).unwrap();
    assert!(matches!(
        journal.delete(id),
        Err(JournalError::NotFound(_))
    ));
    assert!(journal.read_all().unwrap().is_empty());
}
