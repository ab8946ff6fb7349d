use crate::model::{Amount, Kind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated financial entry in one of the ledger's collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Record {
    /// Unique within the owning collection only.
    pub(crate) id: u64,
    pub(crate) date: NaiveDate,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) amount: Amount,
}

impl Record {
    pub(crate) fn new(id: u64, fields: RecordFields) -> Self {
        Self {
            id,
            date: fields.date,
            description: fields.description,
            category: fields.category,
            amount: fields.amount,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The `YYYY-MM` key this record falls under when grouped by month.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Everything but the `id`.
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            date: self.date,
            description: self.description.clone(),
            category: self.category.clone(),
            amount: self.amount,
        }
    }

    /// Replaces every field except `id`.
    pub(crate) fn replace(&mut self, fields: RecordFields) {
        self.date = fields.date;
        self.description = fields.description;
        self.category = fields.category;
        self.amount = fields.amount;
    }
}

/// The caller-supplied part of a `Record`, used to create and to update records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RecordFields {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: Amount,
}

impl RecordFields {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<Amount>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            category: category.into(),
            amount: amount.into(),
        }
    }
}

/// A record annotated with the collection it came from, for views that mix all kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Entry {
    pub kind: Kind,
    #[serde(flatten)]
    pub record: Record,
}
