use serde::{Deserialize, Serialize};

/// The five fixed collections of the ledger.
///
/// The serialized names (`expenses`, `income`, ...) are also the names used on the command line and
/// in export file names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Expenses,
    Income,
    Investments,
    Assets,
    Loans,
}

serde_plain::derive_display_from_serialize!(Kind);
serde_plain::derive_fromstr_from_deserialize!(Kind);

impl Kind {
    /// All kinds, in the order the ledger enumerates them.
    pub const ALL: [Kind; 5] = [
        Kind::Expenses,
        Kind::Income,
        Kind::Investments,
        Kind::Assets,
        Kind::Loans,
    ];

    /// The singular label used when records of several kinds are shown together.
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Expenses => "Expense",
            Kind::Income => "Income",
            Kind::Investments => "Investment",
            Kind::Assets => "Asset",
            Kind::Loans => "Loan",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Kind::Expenses => 0,
            Kind::Income => 1,
            Kind::Investments => 2,
            Kind::Assets => 3,
            Kind::Loans => 4,
        }
    }
}
