//! Error types for fintrack.

use crate::model::Kind;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Conditions raised by the ledger core that a caller is expected to match on and report.
///
/// A missing record on `get` or `update` is not an error; it is signaled with `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// An export was requested for a collection that has no records.
    #[error("No data to export")]
    EmptyInput,

    /// A seed ledger contained the same id twice within one collection.
    #[error("Duplicate id {id} in {kind}")]
    DuplicateId { kind: Kind, id: u64 },

    /// A seed ledger contained an id above `store::MAX_ID`.
    #[error("Id {id} in {kind} is larger than the maximum of {}", crate::store::MAX_ID)]
    IdOutOfRange { kind: Kind, id: u64 },
}
