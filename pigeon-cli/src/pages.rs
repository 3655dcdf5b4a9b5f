//! Read-mostly pages: dashboard, insights, classifier check, theme and premium.

use anyhow::Result;
use clap::Subcommand;
use pigeon_core::{JsonFileStore, classify, prefs, time::today_in};
use pigeon_finance::{
    Ledger,
    insights::{daily_expense, quick_insight},
    summary::{category_breakdown, daily_net, totals},
};

use crate::config::Config;
use crate::render::{self, money};

#[derive(Subcommand, Debug)]
pub enum PremiumCommand {
    /// Turn Premium on (local demo, no payment)
    Upgrade,
    /// Turn Premium off
    Cancel,
    /// Show whether Premium is on
    Status,
}

const PREMIUM_FEATURES: &[(&str, &str)] = &[
    (
        "Priority Auto-Categorisation",
        "Smarter rules with merchant memory and per-merchant overrides.",
    ),
    (
        "CSV Import & Export",
        "pigeon tx import <file.csv> / pigeon tx export <file.csv>",
    ),
    ("Smart Alerts", "Overspend warnings and goal-at-risk notifications."),
];

pub fn dashboard(cfg: &Config, store: &mut JsonFileStore) -> Result<()> {
    let symbol = cfg.display.currency.as_str();
    let today = today_in(&cfg.display.timezone)?;
    let ledger = Ledger::open_with_seed(store, today);
    let txs = ledger.transactions();

    let t = totals(txs);
    println!("Overview\n");
    println!("  Income   {:>14}", money(t.income, symbol));
    println!("  Expense  {:>14}", money(t.expense, symbol));
    println!("  Net      {:>14}\n", money(t.net, symbol));

    render::print_series("Daily Net Flow", &daily_net(txs), symbol);
    println!();
    render::print_breakdown("Expenses by Category", &category_breakdown(txs), symbol);
    println!();

    let all: Vec<_> = txs.iter().collect();
    render::print_transactions(&all, symbol);
    Ok(())
}

pub fn insights(cfg: &Config, store: &mut JsonFileStore) -> Result<()> {
    let symbol = cfg.display.currency.as_str();
    let ledger = Ledger::open(store);
    let txs = ledger.transactions();

    println!("Insights\n");
    println!("{}\n", quick_insight(txs));
    render::print_breakdown("Expenses by Category", &category_breakdown(txs), symbol);
    println!();
    render::print_series("Daily Expenses", &daily_expense(txs), symbol);
    Ok(())
}

pub fn classify_merchant(merchant: &str) {
    let c = classify(merchant);
    println!("{} — {}", c.category, c.reason);
}

pub fn theme(store: &mut JsonFileStore, toggle: bool) -> Result<()> {
    let dark = if toggle {
        prefs::toggle_dark(store)?
    } else {
        prefs::is_dark(&*store)
    };
    println!("Theme: {}", if dark { "dark" } else { "light" });
    Ok(())
}

pub fn premium(store: &mut JsonFileStore, cmd: Option<PremiumCommand>) -> Result<()> {
    match cmd.unwrap_or(PremiumCommand::Status) {
        PremiumCommand::Upgrade => println!("{}", prefs::upgrade(store)?),
        PremiumCommand::Cancel => println!("{}", prefs::cancel(store)?),
        PremiumCommand::Status => {
            if prefs::is_premium(&*store) {
                println!("You are Premium. Enjoy all features!");
            } else {
                println!("Free plan. Premium is A$10 / month (local demo, no real payment):");
                for (title, desc) in PREMIUM_FEATURES {
                    println!("  - {title}: {desc}");
                }
                println!("Run: pigeon premium upgrade");
            }
        }
    }
    Ok(())
}
