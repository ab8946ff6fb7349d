//! Types that represent the core data model, such as `Record`, `Kind` and `Amount`.
mod amount;
mod kind;
mod record;

pub use amount::{Amount, AmountError, MAX_AMOUNT};
pub use kind::Kind;
pub use record::{Entry, Record, RecordFields};
