use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Subcommand;
use pigeon_core::{Category, JsonFileStore, TxType, prefs, time::today_in};
use pigeon_finance::{Ledger, SortOrder, TransactionDraft, TxFilter, csv_io};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::render;

#[derive(Subcommand, Debug)]
pub enum TxCommand {
    /// Record a transaction; leave --category unset to auto-categorise
    Add {
        #[arg(long)]
        merchant: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        amount: Option<f64>,

        /// expense or income
        #[arg(long = "type", default_value = "expense")]
        kind: TxType,

        #[arg(long)]
        category: Option<Category>,

        /// YYYY-MM-DD (default: today in the configured timezone)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Search, filter and sort transactions
    List {
        /// Merchant contains (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        category: Option<Category>,

        #[arg(long = "type")]
        kind: Option<TxType>,

        /// date-desc, date-asc, amt-desc or amt-asc
        #[arg(long, default_value = "date-desc")]
        sort: SortOrder,
    },

    /// Delete one transaction
    Delete { id: String },

    /// Delete several transactions at once (undoable)
    BulkDelete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Restore the last bulk delete
    Undo,

    /// Import transactions from CSV (Premium)
    Import { path: PathBuf },

    /// Export all transactions to CSV (Premium)
    Export { path: PathBuf },
}

pub fn run(cmd: TxCommand, cfg: &Config, store: &mut JsonFileStore) -> Result<()> {
    match cmd {
        TxCommand::Add {
            merchant,
            amount,
            kind,
            category,
            date,
        } => {
            let date = match date {
                Some(d) => d,
                None => today_in(&cfg.display.timezone)?,
            };
            add(
                store,
                TransactionDraft {
                    date,
                    merchant: merchant.unwrap_or_default(),
                    amount: amount.unwrap_or_default(),
                    kind,
                    category,
                },
                &cfg.display.currency,
            )
        }
        TxCommand::List {
            search,
            category,
            kind,
            sort,
        } => {
            let ledger = Ledger::open(store);
            let filter = TxFilter {
                search,
                category,
                kind,
                sort,
            };
            render::print_transactions(&ledger.view(&filter), &cfg.display.currency);
            Ok(())
        }
        TxCommand::Delete { id } => {
            let mut ledger = Ledger::open(store);
            if !ledger.delete(&id)? {
                bail!("no transaction with id {id}");
            }
            println!("Deleted {id}");
            Ok(())
        }
        TxCommand::BulkDelete { ids } => {
            let mut ledger = Ledger::open(store);
            let removed = ledger.bulk_delete(&ids)?;
            println!("Deleted {removed} transaction(s). Run `pigeon tx undo` to restore.");
            Ok(())
        }
        TxCommand::Undo => {
            let mut ledger = Ledger::open(store);
            if !ledger.can_undo() {
                println!("Nothing to undo.");
                return Ok(());
            }
            let restored = ledger.undo()?;
            println!("Restored {restored} transaction(s).");
            Ok(())
        }
        TxCommand::Import { path } => {
            require_premium(store, "CSV import")?;
            import(store, &path)
        }
        TxCommand::Export { path } => {
            require_premium(store, "CSV export")?;
            export(store, &path)
        }
    }
}

fn add(store: &mut JsonFileStore, draft: TransactionDraft, symbol: &str) -> Result<()> {
    let mut ledger = Ledger::open(store);
    let out = ledger.add(draft)?;
    if let Some(notice) = out.notice() {
        println!("{notice}");
    }
    let t = &out.transaction;
    println!(
        "Added {} {} {} ({}) id={}",
        t.date.format("%Y-%m-%d"),
        t.merchant,
        render::money(t.amount, symbol),
        t.category,
        t.id
    );
    Ok(())
}

fn require_premium(store: &JsonFileStore, feature: &str) -> Result<()> {
    if !prefs::is_premium(store) {
        bail!("{feature} is a Premium feature. Run: pigeon premium upgrade");
    }
    Ok(())
}

fn import(store: &mut JsonFileStore, path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let drafts = csv_io::read_drafts(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;

    let mut ledger = Ledger::open(store);
    let summary = ledger.import(drafts)?;
    println!(
        "Imported {} transaction(s) from {} ({} auto-categorised, {} skipped)",
        summary.imported,
        path.display(),
        summary.auto_categorised,
        summary.skipped
    );
    Ok(())
}

fn export(store: &mut JsonFileStore, path: &Path) -> Result<()> {
    let ledger = Ledger::open(store);
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let n = csv_io::write_transactions(ledger.transactions(), BufWriter::new(file))
        .with_context(|| format!("write {}", path.display()))?;
    println!("Exported {n} transaction(s) to {}", path.display());
    Ok(())
}
