//! Read-only views over the ledger.

use crate::aggregate::{self, CategoryTotal, IncomeVsExpenses, MonthTotal, Summary};
use crate::commands::{plural, record_line, Out};
use crate::model::{Entry, Kind, Record};
use crate::store::Ledger;
use crate::{Config, Result};

/// The total of every kind plus net worth.
pub fn summary(ledger: &Ledger, config: &Config) -> Result<Out<Summary>> {
    let symbol = config.currency_symbol();
    let summary = aggregate::summary(ledger);
    let mut lines: Vec<String> = Kind::ALL
        .iter()
        .map(|&kind| {
            format!(
                "{:<12} {:>16}",
                kind.to_string(),
                summary.totals.get(kind).currency(symbol)
            )
        })
        .collect();
    lines.push(format!(
        "{:<12} {:>16}",
        "net worth",
        summary.net_worth.currency(symbol)
    ));
    Ok(Out::new(lines.join("\n"), summary))
}

/// The records of `kind`, newest first.
pub fn list(ledger: &Ledger, config: &Config, kind: Kind) -> Result<Out<Vec<Record>>> {
    let records = ledger.list(kind);
    if records.is_empty() {
        return Ok(Out::new(format!("No {kind} records"), records));
    }
    let mut lines = vec![format!("{} in {kind}", plural(records.len(), "record", "records"))];
    lines.extend(
        records
            .iter()
            .map(|r| record_line(r, config.currency_symbol())),
    );
    Ok(Out::new(lines.join("\n"), records))
}

/// The newest entries across every kind. `limit` falls back to the configured `recent_limit`.
pub fn recent(ledger: &Ledger, config: &Config, limit: Option<usize>) -> Result<Out<Vec<Entry>>> {
    let limit = limit.unwrap_or_else(|| config.recent_limit());
    let entries = ledger.list_all_sorted(Some(limit));
    if entries.is_empty() {
        return Ok(Out::new("No recent transactions", entries));
    }
    let mut lines = vec![String::from("Recent transactions")];
    lines.extend(entries.iter().map(|e| {
        format!(
            "{:<10} {}",
            e.kind.label(),
            record_line(&e.record, config.currency_symbol())
        )
    }));
    Ok(Out::new(lines.join("\n"), entries))
}

/// Expenses per month, oldest first.
pub fn trend(ledger: &Ledger, config: &Config) -> Result<Out<Vec<MonthTotal>>> {
    let trend = aggregate::monthly_expense_trend(ledger);
    if trend.is_empty() {
        return Ok(Out::new("No expenses recorded", trend));
    }
    let mut lines = vec![String::from("Monthly expenses")];
    lines.extend(trend.iter().map(|m| {
        format!(
            "{:<10} {:>16}",
            m.label(),
            m.total.currency(config.currency_symbol())
        )
    }));
    Ok(Out::new(lines.join("\n"), trend))
}

/// The records of `kind` summed per category, in order of first appearance.
pub fn breakdown(ledger: &Ledger, config: &Config, kind: Kind) -> Result<Out<Vec<CategoryTotal>>> {
    let breakdown = aggregate::category_breakdown(ledger, kind);
    if breakdown.is_empty() {
        return Ok(Out::new(format!("No {kind} records"), breakdown));
    }
    let mut lines = vec![format!("{kind} by category")];
    lines.extend(breakdown.iter().map(|c| {
        format!(
            "{:<24} {:>16}",
            c.category,
            c.total.currency(config.currency_symbol())
        )
    }));
    Ok(Out::new(lines.join("\n"), breakdown))
}

pub fn compare(ledger: &Ledger, config: &Config) -> Result<Out<IncomeVsExpenses>> {
    let symbol = config.currency_symbol();
    let ive = aggregate::income_vs_expenses(ledger);
    let message = format!(
        "{:<10} {:>16}\n{:<10} {:>16}",
        "income",
        ive.income.currency(symbol),
        "expenses",
        ive.expenses.currency(symbol)
    );
    Ok(Out::new(message, ive))
}
