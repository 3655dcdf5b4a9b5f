//! pigeon-finance: transaction ledger, budgets, goals and the aggregations the pages render

pub mod budgets;
pub mod csv_io;
pub mod goals;
pub mod insights;
pub mod ledger;
pub mod summary;

pub use budgets::{BudgetBook, BudgetUsage};
pub use goals::{GoalBook, GoalDraft, GoalPacing};
pub use ledger::{AddOutcome, Ledger, SortOrder, TransactionDraft, TxFilter};
pub use summary::{CategoryTotal, DailyPoint, Totals};
