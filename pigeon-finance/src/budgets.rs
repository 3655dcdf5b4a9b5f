//! Budgets page: one monthly ceiling per category and how much of it is used.

use pigeon_core::{Budget, Category, KeyValueStore, Result, StoreExt, Transaction, keys};
use serde::Serialize;
use tracing::info;

/// Consumption of one budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetUsage {
    pub budget: Budget,
    pub used: f64,
    /// Percentage used, clamped to 0..=100
    pub ratio: u32,
    pub over: bool,
}

/// Expense magnitude recorded against a category.
pub fn used_of(category: Category, txs: &[Transaction]) -> f64 {
    txs.iter()
        .filter(|t| t.category == category && t.is_expense())
        .map(|t| t.abs_amount())
        .sum()
}

pub fn usage(budget: &Budget, txs: &[Transaction]) -> BudgetUsage {
    let used = used_of(budget.category, txs);
    // a zero (or unparseable) limit divides by one instead
    let limit = if budget.amount == 0.0 || !budget.amount.is_finite() {
        1.0
    } else {
        budget.amount
    };
    let pct = round_half_up(used / limit * 100.0).clamp(0.0, 100.0);

    BudgetUsage {
        budget: budget.clone(),
        used,
        ratio: pct as u32,
        over: used > budget.amount,
    }
}

/// Rounds .5 toward positive infinity.
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

pub struct BudgetBook<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
    budgets: Vec<Budget>,
}

impl<'a, S: KeyValueStore + ?Sized> BudgetBook<'a, S> {
    pub fn open(store: &'a mut S) -> Self {
        let budgets = store.load(keys::BUDGETS, Vec::new());
        Self { store, budgets }
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// Replace the category's budget in place, or put a new one first.
    pub fn upsert(&mut self, category: Category, amount: f64) -> Result<&Budget> {
        let budget = Budget::new(category, amount);
        let idx = match self.budgets.iter().position(|b| b.id == budget.id) {
            Some(i) => {
                self.budgets[i] = budget;
                i
            }
            None => {
                self.budgets.insert(0, budget);
                0
            }
        };
        self.store.save(keys::BUDGETS, &self.budgets)?;
        info!(%category, amount, "saved budget");
        Ok(&self.budgets[idx])
    }

    /// Usage of every budget against the currently stored transactions.
    pub fn usage(&self) -> Vec<BudgetUsage> {
        let txs: Vec<Transaction> = self.store.load(keys::TRANSACTIONS, Vec::new());
        self.budgets.iter().map(|b| usage(b, &txs)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pigeon_core::{MemoryStore, TxType};

    fn expense(amount: f64, category: Category) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
        Transaction::new(format!("e{amount}"), date, "m", amount, category, TxType::Expense)
    }

    #[test]
    fn test_over_budget_is_clamped() {
        let b = Budget::new(Category::Groceries, 100.0);
        let txs = [expense(70.0, Category::Groceries), expense(50.0, Category::Groceries)];
        let u = usage(&b, &txs);
        assert_eq!(u.used, 120.0);
        assert_eq!(u.ratio, 100);
        assert!(u.over);
    }

    #[test]
    fn test_partial_usage_rounds() {
        let b = Budget::new(Category::Dining, 30.0);
        let txs = [
            expense(10.0, Category::Dining),
            expense(99.0, Category::Transport),
        ];
        let u = usage(&b, &txs);
        assert_eq!(u.ratio, 33);
        assert!(!u.over);

        let b = Budget::new(Category::Dining, 8.0);
        let u = usage(&b, &[expense(1.0, Category::Dining)]);
        // 12.5 rounds up
        assert_eq!(u.ratio, 13);
    }

    #[test]
    fn test_zero_budget_does_not_divide_by_zero() {
        let b = Budget::new(Category::Bills, 0.0);
        let u = usage(&b, &[]);
        assert_eq!(u.ratio, 0);
        assert!(!u.over);

        let u = usage(&b, &[expense(0.5, Category::Bills)]);
        assert_eq!(u.ratio, 50);
        assert!(u.over);
    }

    #[test]
    fn test_negative_limit_clamps_to_zero() {
        let b = Budget::new(Category::Rent, -50.0);
        let u = usage(&b, &[]);
        assert_eq!(u.ratio, 0);
        assert!(u.over);

        let u = usage(&b, &[expense(10.0, Category::Rent)]);
        assert_eq!(u.ratio, 0);
        assert!(u.over);
    }

    #[test]
    fn test_nan_limit_divides_by_one() {
        let b = Budget::new(Category::Bills, f64::NAN);
        let u = usage(&b, &[expense(0.4, Category::Bills)]);
        assert_eq!(u.ratio, 40);
        assert!(!u.over);

        let u = usage(&b, &[expense(7.0, Category::Bills)]);
        assert_eq!(u.ratio, 100);
    }

    #[test]
    fn test_income_does_not_count_as_used() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
        let refund = Transaction::new("r", date, "Coles refund", 20.0, Category::Groceries, TxType::Income);
        assert_eq!(used_of(Category::Groceries, &[refund]), 0.0);
    }

    #[test]
    fn test_upsert_one_per_category() {
        let mut store = MemoryStore::new();
        let mut book = BudgetBook::open(&mut store);
        book.upsert(Category::Groceries, 100.0).unwrap();
        book.upsert(Category::Dining, 50.0).unwrap();
        book.upsert(Category::Groceries, 150.0).unwrap();

        let ids: Vec<&str> = book.budgets().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["b-Dining", "b-Groceries"]);
        assert_eq!(book.budgets()[1].amount, 150.0);

        drop(book);
        let stored: Vec<Budget> = store.load(keys::BUDGETS, Vec::new());
        assert_eq!(stored.len(), 2);
    }

    #[test]
    fn test_book_usage_reads_stored_transactions() {
        let mut store = MemoryStore::new();
        store
            .save(keys::TRANSACTIONS, &vec![expense(25.0, Category::Transport)])
            .unwrap();
        let mut book = BudgetBook::open(&mut store);
        book.upsert(Category::Transport, 100.0).unwrap();
        let usage = book.usage();
        assert_eq!(usage.len(), 1);
        assert_eq!(usage[0].ratio, 25);
    }
}
