//! Record-level command handlers: get, add, update and delete.
//!
//! A missing id is reported in the message and is not an error, so a script keeps going.

use crate::commands::{record_line, Out};
use crate::model::{Kind, Record, RecordFields};
use crate::store::Ledger;
use crate::{Config, Result};

pub fn get(ledger: &Ledger, config: &Config, kind: Kind, id: u64) -> Result<Out<Record>> {
    Ok(match ledger.get(kind, id) {
        Some(record) => Out::new(record_line(&record, config.currency_symbol()), record),
        None => Out::new_message(format!("No record {id} in {kind}")),
    })
}

/// Adds a record to `kind` and returns it with its assigned id.
pub fn add(
    ledger: &mut Ledger,
    config: &Config,
    kind: Kind,
    fields: RecordFields,
) -> Result<Out<Record>> {
    let record = ledger.add(kind, fields);
    let message = format!(
        "Added to {kind}: {}",
        record_line(&record, config.currency_symbol())
    );
    Ok(Out::new(message, record))
}

/// Replaces every field of record `id` in `kind`. Nothing happens if there is no such record.
pub fn update(
    ledger: &mut Ledger,
    config: &Config,
    kind: Kind,
    id: u64,
    fields: RecordFields,
) -> Result<Out<Record>> {
    Ok(match ledger.update(kind, id, fields) {
        Some(record) => {
            let message = format!(
                "Updated in {kind}: {}",
                record_line(&record, config.currency_symbol())
            );
            Out::new(message, record)
        }
        None => Out::new_message(format!("No record {id} in {kind}, nothing was updated")),
    })
}

/// Removes record `id` from `kind`. The structure tells whether anything was removed.
pub fn delete(ledger: &mut Ledger, kind: Kind, id: u64) -> Result<Out<bool>> {
    let removed = ledger.remove(kind, id);
    let message = if removed {
        format!("Deleted record {id} from {kind}")
    } else {
        format!("No record {id} in {kind}, nothing was deleted")
    };
    Ok(Out::new(message, removed))
}
