//! Insights page: daily expense totals and the one-line summary.

use pigeon_core::Transaction;

use crate::summary::{DailyPoint, group_first_seen};

/// Expense magnitude per date, first-seen order.
pub fn daily_expense(txs: &[Transaction]) -> Vec<DailyPoint> {
    group_first_seen(
        txs.iter()
            .filter(|t| t.is_expense())
            .map(|t| (t.date, t.abs_amount())),
    )
    .into_iter()
    .map(|(date, value)| DailyPoint { date, value })
    .collect()
}

/// Short informational sentence; needs at least two transactions and two expenses.
pub fn quick_insight(txs: &[Transaction]) -> String {
    if txs.len() < 2 {
        return "Add a few transactions to see insights.".to_string();
    }

    let expenses: Vec<&Transaction> = txs.iter().filter(|t| t.is_expense()).collect();
    if expenses.len() < 2 {
        return "Add more expenses to unlock insights.".to_string();
    }

    let total: f64 = expenses.iter().map(|t| t.abs_amount()).sum();
    let largest = expenses.iter().map(|t| t.abs_amount()).fold(0.0, f64::max);

    format!(
        "This period: {} expenses, total ${:.2}. Largest single expense: ${:.2}.",
        expenses.len(),
        total,
        largest
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pigeon_core::{Category, TxType};

    fn tx(day: u32, amount: f64, kind: TxType) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
        Transaction::new(format!("t{day}{amount}"), date, "m", amount, Category::Other, kind)
    }

    #[test]
    fn test_quick_insight_needs_two_transactions() {
        assert_eq!(quick_insight(&[]), "Add a few transactions to see insights.");
        assert_eq!(
            quick_insight(&[tx(1, 5.0, TxType::Expense)]),
            "Add a few transactions to see insights."
        );
    }

    #[test]
    fn test_quick_insight_needs_two_expenses() {
        let txs = [tx(1, 5.0, TxType::Expense), tx(1, 100.0, TxType::Income)];
        assert_eq!(quick_insight(&txs), "Add more expenses to unlock insights.");
    }

    #[test]
    fn test_quick_insight_sentence() {
        let txs = [
            tx(1, 56.2, TxType::Expense),
            tx(2, 9.2, TxType::Expense),
            tx(2, 1200.0, TxType::Income),
        ];
        assert_eq!(
            quick_insight(&txs),
            "This period: 2 expenses, total $65.40. Largest single expense: $56.20."
        );
    }

    #[test]
    fn test_daily_expense_skips_income() {
        let txs = [
            tx(2, 4.0, TxType::Expense),
            tx(1, 100.0, TxType::Income),
            tx(2, 6.0, TxType::Expense),
        ];
        let series = daily_expense(&txs);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, 10.0);
    }
}
