//! An in-memory personal finance ledger.
//!
//! The `Ledger` holds five collections of records (expenses, income, investments, assets and
//! loans). The `aggregate` functions derive totals, net worth and grouped breakdowns from it, and
//! the `export` functions write one collection as CSV.

pub mod aggregate;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod export;
mod fs;
pub mod model;
pub mod store;


pub use config::Config;
pub use error::{Error, LedgerError, Result};
pub use store::Ledger;
