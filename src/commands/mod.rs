//! Command handlers for the fintrack CLI.
//!
//! This module contains implementations for all CLI subcommands. Handlers take the ledger they work
//! on explicitly and return an `Out`; none of them print.

mod export;
mod init;
mod records;
mod report;
mod session;

use crate::args::Command;
use crate::model::Record;
use crate::store::Ledger;
use crate::{Config, Result};
use anyhow::bail;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use export::export;
pub use init::init;
pub use records::{add, delete, get, update};
pub use report::{breakdown, compare, list, recent, summary, trend};
pub use session::{session, SessionReport};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Runs `command` against `ledger` and prints its output. `today` names export files.
///
/// `init` is not dispatched here because it runs before any ledger exists.
pub fn execute(
    ledger: &mut Ledger,
    config: &Config,
    command: &Command,
    today: NaiveDate,
) -> Result<()> {
    match command {
        Command::Init => bail!("init cannot be run against a ledger"),
        Command::Summary => summary(ledger, config)?.print(),
        Command::List(args) => list(ledger, config, args.kind())?.print(),
        Command::Recent(args) => recent(ledger, config, args.limit())?.print(),
        Command::Trend => trend(ledger, config)?.print(),
        Command::Breakdown(args) => breakdown(ledger, config, args.kind())?.print(),
        Command::Compare => compare(ledger, config)?.print(),
        Command::Get(args) => get(ledger, config, args.kind(), args.id())?.print(),
        Command::Add(args) => add(ledger, config, args.kind(), args.fields())?.print(),
        Command::Update(args) => {
            update(ledger, config, args.kind(), args.id(), args.fields())?.print()
        }
        Command::Delete(args) => delete(ledger, args.kind(), args.id())?.print(),
        Command::Export(args) => export(ledger, config, args, today)?.print(),
        Command::Session(args) => session(ledger, config, args, today)?.print(),
    };
    Ok(())
}

/// One line describing `record`, amounts shown with `symbol`.
fn record_line(record: &Record, symbol: &str) -> String {
    format!(
        "#{:<3} {}  {:<24} {:<16} {:>14}",
        record.id(),
        record.date(),
        record.description(),
        record.category(),
        record.amount().currency(symbol)
    )
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}
