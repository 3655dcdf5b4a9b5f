//! Finance record types: transactions, budgets and savings goals

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Fixed budgeting labels applied to a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Groceries,
    Dining,
    Transport,
    Entertainment,
    Bills,
    Rent,
    Salary,
    Other,
}

impl Category {
    /// Every category, in the order the pickers list them
    pub const ALL: [Category; 8] = [
        Category::Groceries,
        Category::Dining,
        Category::Transport,
        Category::Entertainment,
        Category::Bills,
        Category::Rent,
        Category::Salary,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Dining => "Dining",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Rent => "Rent",
            Category::Salary => "Salary",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::validation(format!("unknown category: {wanted}")))
    }
}

/// Direction of money flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum TxType {
    #[default]
    #[serde(rename = "expense")]
    Expense,
    #[serde(rename = "income")]
    Income,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Expense => "expense",
            TxType::Income => "income",
        }
    }

    /// Canonical stored amount: income is never negative, expense never positive.
    pub fn signed(&self, raw: f64) -> f64 {
        match self {
            TxType::Income => raw.abs(),
            TxType::Expense => -raw.abs(),
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(TxType::Expense),
            "income" => Ok(TxType::Income),
            other => Err(Error::validation(format!(
                "unknown transaction type: {other} (expected expense or income)"
            ))),
        }
    }
}

/// A single income or expense entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Unique identifier for this record
    pub id: String,
    /// Date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Free-text merchant as entered
    pub merchant: String,
    /// Positive = income, negative = expense
    pub amount: f64,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: TxType,
}

impl Transaction {
    /// Create a transaction, normalizing the amount sign to agree with `kind`
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        merchant: impl Into<String>,
        amount: f64,
        category: Category,
        kind: TxType,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            merchant: merchant.into(),
            amount: kind.signed(amount),
            category,
            kind,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TxType::Income
    }

    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    /// Contribution to a running balance: income as stored, expense as a negated magnitude
    pub fn net_contribution(&self) -> f64 {
        match self.kind {
            TxType::Income => self.amount,
            TxType::Expense => -self.amount.abs(),
        }
    }
}

/// Monthly spending ceiling for one category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    /// Derived from the category, see [`Budget::id_for`]
    pub id: String,
    pub category: Category,
    pub amount: f64,
}

impl Budget {
    pub fn new(category: Category, amount: f64) -> Self {
        Self {
            id: Self::id_for(category),
            category,
            amount,
        }
    }

    /// One budget per category: the id is the category with a fixed prefix.
    pub fn id_for(category: Category) -> String {
        format!("b-{}", category)
    }
}

/// A savings target with a deadline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub target_date: NaiveDate,
    pub saved_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_transaction_sign_follows_type() {
        let exp = Transaction::new("t1", d(2026, 2, 18), "Coles", 56.2, Category::Groceries, TxType::Expense);
        assert_eq!(exp.amount, -56.2);
        assert!(exp.is_expense());

        let inc = Transaction::new("t2", d(2026, 2, 18), "Employer", -1200.0, Category::Salary, TxType::Income);
        assert_eq!(inc.amount, 1200.0);
        assert!(inc.is_income());
        assert_eq!(inc.net_contribution(), 1200.0);
        assert_eq!(exp.net_contribution(), -56.2);
    }

    #[test]
    fn test_transaction_json_shape() {
        let t = Transaction::new("t3", d(2026, 2, 18), "PTV", 9.2, Category::Transport, TxType::Expense);
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["type"], "expense");
        assert_eq!(v["category"], "Transport");
        assert_eq!(v["date"], "2026-02-18");
        assert_eq!(v["amount"], -9.2);
    }

    #[test]
    fn test_goal_uses_camel_case_fields() {
        let raw = r#"{"id":"g1","name":"Trip","targetAmount":1000,"targetDate":"2026-12-01","savedAmount":250.5}"#;
        let g: Goal = serde_json::from_str(raw).unwrap();
        assert_eq!(g.target_amount, 1000.0);
        assert_eq!(g.saved_amount, 250.5);
        assert_eq!(g.target_date, d(2026, 12, 1));
    }

    #[test]
    fn test_budget_id_is_derived_from_category() {
        assert_eq!(Budget::new(Category::Dining, 80.0).id, "b-Dining");
    }

    #[test]
    fn test_parse_category_and_type() {
        assert_eq!("groceries".parse::<Category>().unwrap(), Category::Groceries);
        assert_eq!(" Bills ".parse::<Category>().unwrap(), Category::Bills);
        assert!("Shopping".parse::<Category>().is_err());
        assert_eq!("INCOME".parse::<TxType>().unwrap(), TxType::Income);
        assert!("transfer".parse::<TxType>().is_err());
    }
}
