//! Summaries derived from a `Ledger`.
//!
//! Every function here recomputes from the ledger's current contents; nothing is cached, so the
//! results are always consistent with the latest `add`, `update` or `remove`.

use crate::model::{Amount, Kind};
use crate::store::Ledger;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// The sum of `amount` for each kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Totals {
    pub expenses: Amount,
    pub income: Amount,
    pub investments: Amount,
    pub assets: Amount,
    pub loans: Amount,
}

impl Totals {
    pub fn get(&self, kind: Kind) -> Amount {
        match kind {
            Kind::Expenses => self.expenses,
            Kind::Income => self.income,
            Kind::Investments => self.investments,
            Kind::Assets => self.assets,
            Kind::Loans => self.loans,
        }
    }
}

/// Expenses summed over one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthTotal {
    /// `YYYY-MM`
    pub month: String,
    pub total: Amount,
}

impl MonthTotal {
    /// A short display label for the month, e.g. `Oct 2025`. Falls back to the raw key.
    pub fn label(&self) -> String {
        NaiveDate::parse_from_str(&format!("{}-01", self.month), "%Y-%m-%d")
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|_| self.month.clone())
    }
}

/// Records of one category summed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoryTotal {
    pub category: String,
    pub total: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct IncomeVsExpenses {
    pub income: Amount,
    pub expenses: Amount,
}

/// The headline numbers: every total plus net worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Summary {
    pub totals: Totals,
    pub net_worth: Amount,
}

pub fn totals(ledger: &Ledger) -> Totals {
    let sum = |kind: Kind| -> Amount { ledger.records(kind).iter().map(|r| r.amount()).sum() };
    Totals {
        expenses: sum(Kind::Expenses),
        income: sum(Kind::Income),
        investments: sum(Kind::Investments),
        assets: sum(Kind::Assets),
        loans: sum(Kind::Loans),
    }
}

/// Assets minus loans. This is not clamped and goes negative when debt exceeds assets.
pub fn net_worth(ledger: &Ledger) -> Amount {
    let totals = totals(ledger);
    Amount::new(totals.assets.value() - totals.loans.value())
}

/// Expenses grouped by `YYYY-MM`, oldest month first. Months without expenses are left out.
pub fn monthly_expense_trend(ledger: &Ledger) -> Vec<MonthTotal> {
    let mut months: BTreeMap<String, Amount> = BTreeMap::new();
    for record in ledger.records(Kind::Expenses) {
        *months.entry(record.month_key()).or_default() += record.amount();
    }
    months
        .into_iter()
        .map(|(month, total)| MonthTotal { month, total })
        .collect()
}

/// Records of `kind` grouped by category, in the order each category first appears in the
/// collection.
pub fn category_breakdown(ledger: &Ledger, kind: Kind) -> Vec<CategoryTotal> {
    let mut breakdown: Vec<CategoryTotal> = Vec::new();
    for record in ledger.records(kind) {
        match breakdown
            .iter_mut()
            .find(|c| c.category == record.category())
        {
            Some(existing) => existing.total += record.amount(),
            None => breakdown.push(CategoryTotal {
                category: record.category().to_string(),
                total: record.amount(),
            }),
        }
    }
    breakdown
}

pub fn income_vs_expenses(ledger: &Ledger) -> IncomeVsExpenses {
    let totals = totals(ledger);
    IncomeVsExpenses {
        income: totals.income,
        expenses: totals.expenses,
    }
}

pub fn summary(ledger: &Ledger) -> Summary {
    Summary {
        totals: totals(ledger),
        net_worth: net_worth(ledger),
    }
}
