//! Aggregations over the transaction list.
//!
//! Everything here is recomputed from the full list on each call. Grouped
//! series keep the order in which each key is first seen in the input,
//! they are not sorted by date or by value.

use chrono::NaiveDate;
use pigeon_core::{Category, Transaction};
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// Income, expense and net for a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub income: f64,
    /// Sum of expense magnitudes, never negative
    pub expense: f64,
    pub net: f64,
}

/// One point of a per-day series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub value: f64,
}

pub fn totals(txs: &[Transaction]) -> Totals {
    let income: f64 = txs.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let expense: f64 = txs.iter().filter(|t| t.is_expense()).map(|t| t.abs_amount()).sum();
    Totals {
        income,
        expense,
        net: income - expense,
    }
}

/// Net flow per distinct date: income added, expense subtracted.
pub fn daily_net(txs: &[Transaction]) -> Vec<DailyPoint> {
    group_first_seen(txs.iter().map(|t| (t.date, t.net_contribution())))
        .into_iter()
        .map(|(date, value)| DailyPoint { date, value })
        .collect()
}

/// Expense magnitude per category, only categories with at least one expense.
pub fn category_breakdown(txs: &[Transaction]) -> Vec<CategoryTotal> {
    group_first_seen(
        txs.iter()
            .filter(|t| t.is_expense())
            .map(|t| (t.category, t.abs_amount())),
    )
    .into_iter()
    .map(|(category, value)| CategoryTotal { category, value })
    .collect()
}

/// Sum values per key, one entry per key in first-seen order.
pub(crate) fn group_first_seen<K, I>(items: I) -> Vec<(K, f64)>
where
    K: Eq + Hash + Copy,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut slot: HashMap<K, usize> = HashMap::new();
    let mut out: Vec<(K, f64)> = Vec::new();

    for (key, value) in items {
        match slot.get(&key) {
            Some(&i) => out[i].1 += value,
            None => {
                slot.insert(key, out.len());
                out.push((key, value));
            }
        }
    }

    out
}
