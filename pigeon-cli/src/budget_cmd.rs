use anyhow::Result;
use clap::Subcommand;
use pigeon_core::{Category, JsonFileStore};
use pigeon_finance::BudgetBook;

use crate::config::Config;
use crate::render::{bar, money};

#[derive(Subcommand, Debug)]
pub enum BudgetCommand {
    /// Set or update the monthly budget for a category
    Set {
        category: Category,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Show every budget with how much is used
    List,
}

pub fn run(cmd: BudgetCommand, cfg: &Config, store: &mut JsonFileStore) -> Result<()> {
    let symbol = cfg.display.currency.as_str();
    let mut book = BudgetBook::open(store);

    match cmd {
        BudgetCommand::Set { category, amount } => {
            let b = book.upsert(category, amount)?;
            println!("Budget for {} set to {} / month", b.category, money(b.amount, symbol));
        }
        BudgetCommand::List => {
            let usage = book.usage();
            if usage.is_empty() {
                println!("No budgets yet. Try: pigeon budget set Groceries 400");
            }
            for u in usage {
                println!("{:<13} {:>3}% used", u.budget.category.as_str(), u.ratio);
                println!(
                    "  {} {} / {}{}",
                    bar(u.ratio, 30),
                    money(u.used, symbol),
                    money(u.budget.amount, symbol),
                    if u.over { "  Over budget!" } else { "" }
                );
            }
        }
    }
    Ok(())
}
