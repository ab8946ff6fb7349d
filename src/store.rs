//! The record store: five collections of records with per-collection id assignment.

use crate::error::LedgerError;
use crate::model::{Entry, Kind, Record, RecordFields};
use crate::{fs, Result};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// The largest id a seed ledger may hold. `add` counts up from the highest id, so this leaves room
/// for every id it can hand out.
pub const MAX_ID: u64 = i64::MAX as u64;

/// Holds the records of every `Kind`.
///
/// The `Ledger` owns its records. Every accessor hands out copies, so callers cannot change the
/// stored state except through `add`, `update` and `remove`. Nothing derived from the records is
/// cached here; see the `aggregate` module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    collections: [Vec<Record>; 5],
}

impl Ledger {
    /// Creates a ledger with five empty collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a ledger from a JSON file shaped like `{"expenses": [...], "income": [...], ...}`.
    /// Missing collections are empty. Ids must be unique within each collection.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let file: LedgerFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse ledger file at {}", path.display()))?;
        let ledger = Self::try_from(file)
            .with_context(|| format!("Invalid ledger file at {}", path.display()))?;
        debug!(
            "Loaded {} records from {}",
            ledger.len(),
            path.to_string_lossy()
        );
        Ok(ledger)
    }

    /// Adds a record to `kind`, assigning it the next id in that collection, and returns a copy.
    pub fn add(&mut self, kind: Kind, fields: RecordFields) -> Record {
        let collection = self.collection_mut(kind);
        let id = collection.iter().map(Record::id).max().unwrap_or(0) + 1;
        let record = Record::new(id, fields);
        collection.push(record.clone());
        record
    }

    /// Replaces all fields of the record `id` in `kind` except the `id` itself. Returns `None` when
    /// no such record exists, in which case nothing changes.
    pub fn update(&mut self, kind: Kind, id: u64, fields: RecordFields) -> Option<Record> {
        match self.collection_mut(kind).iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.replace(fields);
                Some(record.clone())
            }
            None => {
                debug!("No record {id} in {kind} to update");
                None
            }
        }
    }

    /// Removes the record `id` from `kind`. Returns whether anything was removed.
    pub fn remove(&mut self, kind: Kind, id: u64) -> bool {
        let collection = self.collection_mut(kind);
        let before = collection.len();
        collection.retain(|r| r.id != id);
        let removed = collection.len() < before;
        if !removed {
            debug!("No record {id} in {kind} to remove");
        }
        removed
    }

    pub fn get(&self, kind: Kind, id: u64) -> Option<Record> {
        self.collection(kind).iter().find(|r| r.id == id).cloned()
    }

    /// A copy of the records of `kind`, newest first. Records on the same date keep their stored
    /// relative order.
    pub fn list(&self, kind: Kind) -> Vec<Record> {
        let mut records = self.collection(kind).to_vec();
        sort_newest_first(&mut records, Record::date);
        records
    }

    /// Every record of every kind, newest first, optionally cut to the first `limit`.
    ///
    /// Ties on date are resolved by kind order (`Kind::ALL`) and then by stored order.
    pub fn list_all_sorted(&self, limit: Option<usize>) -> Vec<Entry> {
        let mut entries: Vec<Entry> = Kind::ALL
            .iter()
            .flat_map(|&kind| {
                self.collection(kind).iter().map(move |record| Entry {
                    kind,
                    record: record.clone(),
                })
            })
            .collect();
        sort_newest_first(&mut entries, |e| e.record.date);
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        entries
    }

    /// Total number of records across all kinds.
    pub fn len(&self) -> usize {
        self.collections.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The records of `kind` in stored order. This is the order aggregation walks them in.
    pub(crate) fn records(&self, kind: Kind) -> &[Record] {
        self.collection(kind)
    }

    fn collection(&self, kind: Kind) -> &Vec<Record> {
        &self.collections[kind.index()]
    }

    fn collection_mut(&mut self, kind: Kind) -> &mut Vec<Record> {
        &mut self.collections[kind.index()]
    }

    /// The starting data of a fresh tracker.
    pub fn sample() -> Self {
        let mut ledger = Self::new();
        let rows: [(Kind, (i32, u32, u32), &str, u64, &str); 12] = [
            (Kind::Expenses, (2025, 10, 1), "Groceries", 2500, "Food"),
            (Kind::Expenses, (2025, 10, 2), "Fuel", 3000, "Transportation"),
            (Kind::Expenses, (2025, 10, 3), "Movie tickets", 800, "Entertainment"),
            (Kind::Income, (2025, 10, 1), "Salary", 75000, "Primary Job"),
            (Kind::Income, (2025, 10, 5), "Freelance project", 15000, "Freelance"),
            (Kind::Investments, (2025, 10, 1), "Mutual Fund SIP", 10000, "Equity"),
            (Kind::Investments, (2025, 10, 1), "Fixed Deposit", 50000, "Debt"),
            (Kind::Assets, (2025, 1, 1), "Apartment", 5000000, "Real Estate"),
            (Kind::Assets, (2025, 1, 1), "Car", 800000, "Vehicle"),
            (Kind::Assets, (2025, 10, 1), "Savings Account", 150000, "Cash"),
            (Kind::Loans, (2025, 1, 1), "Home Loan", 3500000, "Real Estate"),
            (Kind::Loans, (2025, 1, 1), "Car Loan", 300000, "Vehicle"),
        ];
        for (kind, (y, m, d), description, amount, category) in rows {
            // The table above only holds valid calendar dates.
            let date = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
            ledger.add(kind, RecordFields::new(date, description, category, amount));
        }
        ledger
    }
}

/// Stable sort, newest date first.
fn sort_newest_first<T>(items: &mut [T], date: impl Fn(&T) -> NaiveDate) {
    items.sort_by(|a, b| date(b).cmp(&date(a)));
}

/// The on-disk shape of a ledger seed file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
struct LedgerFile {
    #[serde(default)]
    expenses: Vec<Record>,
    #[serde(default)]
    income: Vec<Record>,
    #[serde(default)]
    investments: Vec<Record>,
    #[serde(default)]
    assets: Vec<Record>,
    #[serde(default)]
    loans: Vec<Record>,
}

impl TryFrom<LedgerFile> for Ledger {
    type Error = LedgerError;

    fn try_from(file: LedgerFile) -> std::result::Result<Self, Self::Error> {
        let collections = [
            file.expenses,
            file.income,
            file.investments,
            file.assets,
            file.loans,
        ];
        for kind in Kind::ALL {
            let records = &collections[kind.index()];
            if let Some(big) = records.iter().find(|r| r.id > MAX_ID) {
                return Err(LedgerError::IdOutOfRange { kind, id: big.id });
            }
            let mut seen = BTreeSet::new();
            if let Some(dup) = records.iter().find(|r| !seen.insert(r.id)) {
                return Err(LedgerError::DuplicateId { kind, id: dup.id });
            }
        }
        Ok(Self { collections })
    }
}

impl From<&Ledger> for LedgerFile {
    fn from(ledger: &Ledger) -> Self {
        let [expenses, income, investments, assets, loans] = ledger.collections.clone();
        Self {
            expenses,
            income,
            investments,
            assets,
            loans,
        }
    }
}

impl Serialize for Ledger {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        LedgerFile::from(self).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{date, fields};

    #[test]
    fn test_add_assigns_max_plus_one() {
        let mut ledger = Ledger::new();
        let a = ledger.add(Kind::Expenses, fields("2025-10-01", "A", "Food", 10));
        let b = ledger.add(Kind::Expenses, fields("2025-10-02", "B", "Food", 20));
        let c = ledger.add(Kind::Income, fields("2025-10-02", "C", "Job", 30));
        assert_eq!(a.id(), 1);
        assert_eq!(b.id(), 2);
        // ids are per collection
        assert_eq!(c.id(), 1);
    }

    #[test]
    fn test_add_after_removing_highest_reuses_id() {
        let mut ledger = Ledger::new();
        ledger.add(Kind::Loans, fields("2025-01-01", "A", "X", 1));
        let b = ledger.add(Kind::Loans, fields("2025-01-01", "B", "X", 1));
        assert!(ledger.remove(Kind::Loans, b.id()));
        let c = ledger.add(Kind::Loans, fields("2025-01-01", "C", "X", 1));
        assert_eq!(c.id(), 2);
    }

    #[test]
    fn test_add_after_removing_lower_skips_gap() {
        let mut ledger = Ledger::sample();
        assert!(ledger.remove(Kind::Expenses, 1));
        let record = ledger.add(Kind::Expenses, fields("2025-10-04", "Taxi", "Transportation", 400));
        assert_eq!(record.id(), 4);
    }

    #[test]
    fn test_ids_unique_over_many_adds() {
        let mut ledger = Ledger::new();
        let mut ids = BTreeSet::new();
        for i in 0..25 {
            let record = ledger.add(Kind::Assets, fields("2025-03-01", "thing", "Stuff", i));
            if i % 4 == 0 {
                ledger.remove(Kind::Assets, record.id() - 1);
            }
        }
        for record in ledger.list(Kind::Assets) {
            assert!(ids.insert(record.id()));
        }
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut ledger = Ledger::sample();
        assert!(ledger.remove(Kind::Income, 2));
        assert!(!ledger.remove(Kind::Income, 2));
        assert_eq!(ledger.list(Kind::Income).len(), 1);
    }

    #[test]
    fn test_update_then_get() {
        let mut ledger = Ledger::sample();
        let new_fields = fields("2025-09-30", "Weekly groceries", "Groceries", 2750);
        let updated = ledger.update(Kind::Expenses, 1, new_fields.clone()).unwrap();
        assert_eq!(updated.id(), 1);
        let fetched = ledger.get(Kind::Expenses, 1).unwrap();
        assert_eq!(fetched.id(), 1);
        assert_eq!(fetched.fields(), new_fields);
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut ledger = Ledger::sample();
        let before = ledger.clone();
        let result = ledger.update(Kind::Assets, 99, fields("2025-01-01", "X", "Y", 1));
        assert!(result.is_none());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_get_missing() {
        let ledger = Ledger::new();
        assert!(ledger.get(Kind::Expenses, 1).is_none());
    }

    #[test]
    fn test_list_sorted_newest_first() {
        let mut ledger = Ledger::new();
        ledger.add(Kind::Expenses, fields("2025-10-02", "middle", "X", 1));
        ledger.add(Kind::Expenses, fields("2025-09-15", "oldest", "X", 1));
        ledger.add(Kind::Expenses, fields("2025-11-20", "newest", "X", 1));
        let list = ledger.list(Kind::Expenses);
        let descriptions: Vec<&str> = list.iter().map(Record::description).collect();
        assert_eq!(descriptions, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_list_is_stable_on_ties() {
        let ledger = Ledger::sample();
        let list = ledger.list(Kind::Investments);
        assert_eq!(list[0].description(), "Mutual Fund SIP");
        assert_eq!(list[1].description(), "Fixed Deposit");
    }

    #[test]
    fn test_list_is_a_copy() {
        let ledger = Ledger::sample();
        let mut list = ledger.list(Kind::Expenses);
        list.clear();
        assert_eq!(ledger.list(Kind::Expenses).len(), 3);
    }

    #[test]
    fn test_list_all_sorted_limit() {
        let ledger = Ledger::sample();
        let all = ledger.list_all_sorted(None);
        assert_eq!(all.len(), 12);
        let recent = ledger.list_all_sorted(Some(10));
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].kind, Kind::Income);
        assert_eq!(recent[0].record.description(), "Freelance project");
        assert_eq!(recent[0].record.date(), date("2025-10-05"));
        for pair in recent.windows(2) {
            assert!(pair[0].record.date() >= pair[1].record.date());
        }
    }

    #[test]
    fn test_list_all_sorted_ties_follow_kind_order() {
        let ledger = Ledger::sample();
        let on_first: Vec<(Kind, String)> = ledger
            .list_all_sorted(None)
            .into_iter()
            .filter(|e| e.record.date() == date("2025-10-01"))
            .map(|e| (e.kind, e.record.description().to_string()))
            .collect();
        assert_eq!(
            on_first,
            vec![
                (Kind::Expenses, "Groceries".to_string()),
                (Kind::Income, "Salary".to_string()),
                (Kind::Investments, "Mutual Fund SIP".to_string()),
                (Kind::Investments, "Fixed Deposit".to_string()),
                (Kind::Assets, "Savings Account".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_all_sorted_empty() {
        assert!(Ledger::new().list_all_sorted(Some(10)).is_empty());
    }

    #[test]
    fn test_sample_contents() {
        let ledger = Ledger::sample();
        assert_eq!(ledger.len(), 12);
        assert_eq!(ledger.records(Kind::Expenses).len(), 3);
        assert_eq!(ledger.records(Kind::Assets).len(), 3);
        assert_eq!(ledger.get(Kind::Loans, 1).unwrap().description(), "Home Loan");
    }

    #[test]
    fn test_load_round_trips_sample() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        let json = serde_json::to_string_pretty(&Ledger::sample()).unwrap();
        std::fs::write(&path, json).unwrap();
        let loaded = Ledger::load(&path).unwrap();
        assert_eq!(loaded, Ledger::sample());
    }

    #[test]
    fn test_load_accepts_numbers_and_missing_kinds() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        let json = r#"{"expenses": [
            {"id": 4, "date": "2025-10-01", "description": "Groceries", "category": "Food", "amount": 2500}
        ]}"#;
        std::fs::write(&path, json).unwrap();
        let mut loaded = Ledger::load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.list(Kind::Loans).is_empty());
        let next = loaded.add(Kind::Expenses, fields("2025-10-02", "Fuel", "Transportation", 3000));
        assert_eq!(next.id(), 5);
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        let json = r#"{"income": [
            {"id": 1, "date": "2025-10-01", "description": "a", "category": "x", "amount": 1},
            {"id": 1, "date": "2025-10-02", "description": "b", "category": "x", "amount": 2}
        ]}"#;
        std::fs::write(&path, json).unwrap();
        let err = Ledger::load(&path).unwrap_err();
        let ledger_err = err.downcast_ref::<LedgerError>().unwrap();
        assert_eq!(
            ledger_err,
            &LedgerError::DuplicateId {
                kind: Kind::Income,
                id: 1
            }
        );
    }

    #[test]
    fn test_load_rejects_max_id() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        let json = r#"{"loans": [
            {"id": 18446744073709551615, "date": "2025-01-01", "description": "a", "category": "x", "amount": 1}
        ]}"#;
        std::fs::write(&path, json).unwrap();
        let err = Ledger::load(&path).unwrap_err();
        let ledger_err = err.downcast_ref::<LedgerError>().unwrap();
        assert_eq!(
            ledger_err,
            &LedgerError::IdOutOfRange {
                kind: Kind::Loans,
                id: u64::MAX
            }
        );
    }

    #[test]
    fn test_load_accepts_max_id_and_adds_after_it() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        let json = format!(
            r#"{{"loans": [
                {{"id": {MAX_ID}, "date": "2025-01-01", "description": "a", "category": "x", "amount": 1}}
            ]}}"#
        );
        std::fs::write(&path, json).unwrap();
        let mut ledger = Ledger::load(&path).unwrap();
        let next = ledger.add(Kind::Loans, fields("2025-01-02", "b", "x", 2));
        assert_eq!(next.id(), MAX_ID + 1);
        assert_eq!(ledger.list(Kind::Loans).len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(Ledger::load(dir.path().join("nope.json")).is_err());
    }
}
