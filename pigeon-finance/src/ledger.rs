//! Ledger: the transaction list behind the Transactions and Dashboard pages.
//!
//! A `Ledger` reads `pb_tx` when opened and writes the full list back after
//! every mutation. Bulk deletes park the removed records in a single-slot
//! undo buffer (`pb_undo`), overwritten by the next bulk delete.

use chrono::NaiveDate;
use pigeon_core::{
    Category, Classification, Error, KeyValueStore, Result, StoreExt, Transaction, TxType,
    classify, keys,
};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

pub const MISSING_INPUT_MESSAGE: &str = "Please enter merchant and amount";

/// User input for a new transaction, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub merchant: String,
    /// Raw amount; its sign is replaced according to `kind`
    pub amount: f64,
    pub kind: TxType,
    /// `None` (or `Other`, the form default) asks the classifier
    pub category: Option<Category>,
}

/// What `add` stored, and the classification if one was made
#[derive(Debug, Clone, PartialEq)]
pub struct AddOutcome {
    pub transaction: Transaction,
    pub auto: Option<Classification>,
}

impl AddOutcome {
    /// Notice naming the chosen category and rule, when the classifier ran
    pub fn notice(&self) -> Option<String> {
        self.auto
            .map(|c| format!("Auto-categorised as {} — {}", c.category, c.reason))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "date-desc" => Ok(SortOrder::DateDesc),
            "date-asc" => Ok(SortOrder::DateAsc),
            "amt-desc" => Ok(SortOrder::AmountDesc),
            "amt-asc" => Ok(SortOrder::AmountAsc),
            other => Err(Error::validation(format!(
                "unknown sort: {other} (expected date-desc, date-asc, amt-desc or amt-asc)"
            ))),
        }
    }
}

/// Search + filter + sort for the transaction table
#[derive(Debug, Clone, Default)]
pub struct TxFilter {
    /// Case-insensitive merchant substring
    pub search: Option<String>,
    pub category: Option<Category>,
    pub kind: Option<TxType>,
    pub sort: SortOrder,
}

impl TxFilter {
    fn accepts(&self, t: &Transaction, needle: Option<&str>) -> bool {
        needle.is_none_or(|q| t.merchant.to_lowercase().contains(q))
            && self.category.is_none_or(|c| t.category == c)
            && self.kind.is_none_or(|k| t.kind == k)
    }
}

/// Counts from a CSV import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub imported: usize,
    pub auto_categorised: usize,
    pub skipped: usize,
}

pub struct Ledger<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
    transactions: Vec<Transaction>,
    undo_bin: Option<Vec<Transaction>>,
}

impl<'a, S: KeyValueStore + ?Sized> Ledger<'a, S> {
    /// Open with an empty list when nothing is stored.
    pub fn open(store: &'a mut S) -> Self {
        Self::open_with_default(store, Vec::new())
    }

    /// Open for the dashboard, which starts from sample data when nothing is stored.
    pub fn open_with_seed(store: &'a mut S, today: NaiveDate) -> Self {
        Self::open_with_default(store, seed_transactions(today))
    }

    fn open_with_default(store: &'a mut S, default: Vec<Transaction>) -> Self {
        let transactions: Vec<Transaction> = store.load(keys::TRANSACTIONS, default);
        let undo_bin: Option<Vec<Transaction>> = store.load(keys::UNDO, None);
        debug!(count = transactions.len(), undo = undo_bin.is_some(), "opened ledger");
        Self {
            store,
            transactions,
            undo_bin,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Validate, classify if needed, prepend and persist.
    pub fn add(&mut self, draft: TransactionDraft) -> Result<AddOutcome> {
        let outcome = build_transaction(draft)?;
        self.transactions.insert(0, outcome.transaction.clone());
        self.persist()?;
        info!(
            id = %outcome.transaction.id,
            category = %outcome.transaction.category,
            "added transaction"
        );
        Ok(outcome)
    }

    /// Add every valid draft; invalid rows are counted and skipped.
    pub fn import(&mut self, drafts: Vec<TransactionDraft>) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();
        let mut fresh = Vec::with_capacity(drafts.len());

        for draft in drafts {
            match build_transaction(draft) {
                Ok(outcome) => {
                    if outcome.auto.is_some() {
                        summary.auto_categorised += 1;
                    }
                    fresh.push(outcome.transaction);
                }
                Err(Error::Validation(msg)) => {
                    debug!(reason = %msg, "skipped import row");
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        summary.imported = fresh.len();
        if !fresh.is_empty() {
            fresh.append(&mut self.transactions);
            self.transactions = fresh;
            self.persist()?;
        }
        info!(
            imported = summary.imported,
            skipped = summary.skipped,
            "imported transactions"
        );
        Ok(summary)
    }

    /// Remove one record. Returns false when the id is unknown.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            return Ok(false);
        }
        self.persist()?;
        info!(id, "deleted transaction");
        Ok(true)
    }

    /// Remove every selected record into the undo buffer. Empty selection is a no-op.
    pub fn bulk_delete(&mut self, ids: &[String]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let selected: HashSet<&str> = ids.iter().map(String::as_str).collect();

        let (bin, keep): (Vec<Transaction>, Vec<Transaction>) = self
            .transactions
            .drain(..)
            .partition(|t| selected.contains(t.id.as_str()));

        let removed = bin.len();
        self.transactions = keep;
        self.undo_bin = Some(bin);
        self.store.save(keys::UNDO, &self.undo_bin)?;
        self.persist()?;
        info!(removed, "bulk deleted transactions");
        Ok(removed)
    }

    pub fn can_undo(&self) -> bool {
        self.undo_bin.is_some()
    }

    /// Put the last bulk delete back in front of the list, verbatim.
    pub fn undo(&mut self) -> Result<usize> {
        let Some(mut bin) = self.undo_bin.take() else {
            return Ok(0);
        };
        let restored = bin.len();
        bin.append(&mut self.transactions);
        self.transactions = bin;
        self.store.remove(keys::UNDO)?;
        self.persist()?;
        info!(restored, "undid bulk delete");
        Ok(restored)
    }

    /// Filtered, sorted view of the list.
    pub fn view(&self, filter: &TxFilter) -> Vec<&Transaction> {
        let needle = filter
            .search
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let mut list: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| filter.accepts(t, needle.as_deref()))
            .collect();

        list.sort_by(|a, b| match filter.sort {
            SortOrder::DateAsc => a.date.cmp(&b.date),
            SortOrder::DateDesc => b.date.cmp(&a.date),
            SortOrder::AmountAsc => cmp_f64(a.abs_amount(), b.abs_amount()),
            SortOrder::AmountDesc => cmp_f64(b.abs_amount(), a.abs_amount()),
        });
        list
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(keys::TRANSACTIONS, &self.transactions)
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn build_transaction(draft: TransactionDraft) -> Result<AddOutcome> {
    if draft.merchant.trim().is_empty() || draft.amount == 0.0 || !draft.amount.is_finite() {
        return Err(Error::validation(MISSING_INPUT_MESSAGE));
    }

    let (category, auto) = match draft.category {
        Some(c) if c != Category::Other => (c, None),
        _ => {
            let c = classify(&draft.merchant);
            (c.category, Some(c))
        }
    };

    let transaction = Transaction::new(
        Uuid::new_v4().to_string(),
        draft.date,
        draft.merchant,
        draft.amount,
        category,
        draft.kind,
    );
    Ok(AddOutcome { transaction, auto })
}

/// Sample records the dashboard shows before anything has been stored.
pub fn seed_transactions(today: NaiveDate) -> Vec<Transaction> {
    vec![
        Transaction::new("t1", today, "Coles", 56.2, Category::Groceries, TxType::Expense),
        Transaction::new("t2", today, "Employer Pty", 1200.0, Category::Salary, TxType::Income),
        Transaction::new("t3", today, "PTV", 9.2, Category::Transport, TxType::Expense),
    ]
}
