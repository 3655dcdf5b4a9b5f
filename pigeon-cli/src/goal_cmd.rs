use anyhow::{Result, bail};
use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use pigeon_core::JsonFileStore;
use pigeon_finance::{
    GoalBook, GoalDraft,
    goals::{QUICK_AMOUNTS, pacing, progress_pct},
};
use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::render::{bar, money};

#[derive(Subcommand, Debug)]
pub enum GoalCommand {
    /// Create a goal, or update one when --id is given
    Save {
        #[arg(long)]
        id: Option<String>,

        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value_t = 0.0)]
        target: f64,

        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,

        #[arg(long, default_value_t = 0.0)]
        saved: f64,
    },

    /// Show goals with progress and a suggested monthly saving
    List,

    /// Add to a goal's saved amount (quick amounts: 50, 100, 500)
    AddSaved {
        id: String,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Delete a goal (asks for confirmation)
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub fn run(cmd: GoalCommand, cfg: &Config, store: &mut JsonFileStore) -> Result<()> {
    let symbol = cfg.display.currency.as_str();
    let mut book = GoalBook::open(store);

    match cmd {
        GoalCommand::Save {
            id,
            name,
            target,
            date,
            saved,
        } => {
            let g = book.save_draft(GoalDraft {
                id,
                name,
                target_amount: target,
                target_date: date,
                saved_amount: saved,
            })?;
            println!("Saved goal \"{}\" id={}", g.name, g.id);
        }
        GoalCommand::List => {
            if book.goals().is_empty() {
                println!("No goals yet. Try: pigeon goal save --name Holiday --target 1500 --date 2026-12-01");
            }
            let now = Utc::now();
            for g in book.goals() {
                let pct = progress_pct(g);
                let p = pacing(g, now);
                println!("{}  ({}%)  id={}", g.name, pct, g.id);
                println!(
                    "  {} {} / {}  by {}",
                    bar(pct, 30),
                    money(g.saved_amount, symbol),
                    money(g.target_amount, symbol),
                    g.target_date.format("%Y-%m-%d")
                );
                println!(
                    "  Suggested monthly save: {} over {} month(s)",
                    money(p.suggested_monthly, symbol),
                    p.months_remaining
                );
            }
            if !book.goals().is_empty() {
                let quick: Vec<String> = QUICK_AMOUNTS.iter().map(|a| money(*a, symbol)).collect();
                println!("\nQuick add: pigeon goal add-saved <id> <{}>", quick.join("|"));
            }
        }
        GoalCommand::AddSaved { id, amount } => match book.add_saved(&id, amount)? {
            Some(g) => println!(
                "{}: {} / {}",
                g.name,
                money(g.saved_amount, symbol),
                money(g.target_amount, symbol)
            ),
            None => println!("Nothing added."),
        },
        GoalCommand::Delete { id, yes } => {
            if delete_goal(&mut book, &id, yes, &mut io::stdin().lock())? {
                println!("Deleted goal {id}");
            } else {
                println!("Kept.");
            }
        }
    }
    Ok(())
}

/// Remove a goal once the user agrees (or `--yes`). Returns whether it was removed.
fn delete_goal<R: BufRead>(
    book: &mut GoalBook<'_, JsonFileStore>,
    id: &str,
    yes: bool,
    input: &mut R,
) -> Result<bool> {
    let Some(goal) = book.get(id) else {
        bail!("no goal with id {id}");
    };
    let question = format!("Delete goal “{}”? This cannot be undone.", goal.name);
    if !yes && !confirm(&question, input)? {
        return Ok(false);
    }
    Ok(book.remove(id)?)
}

fn confirm<R: BufRead>(question: &str, input: &mut R) -> Result<bool> {
    print!("{question} [y/N]: ");
    io::stdout().flush()?;
    let mut s = String::new();
    input.read_line(&mut s)?;
    Ok(matches!(s.trim().to_lowercase().as_str(), "y" | "yes"))
}
