use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

mod budget_cmd;
mod config;
mod goal_cmd;
mod logging;
mod pages;
mod render;
mod state;
mod tx_cmd;

#[derive(Parser, Debug)]
#[command(
    name = "pigeon",
    version,
    long_version = concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("PIGEON_BUILD_SHA"),
        " ",
        env!("PIGEON_BUILD_DATE"),
        ")"
    ),
    about = "Pigeon Budget: transactions, budgets and savings goals from the terminal"
)]
struct Cli {
    /// Directory holding the pb_*.json lists (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Income, expense and net with daily flow and category split
    Dashboard,

    /// Transactions: add, list, delete, bulk delete + undo, CSV
    Tx {
        #[command(subcommand)]
        command: tx_cmd::TxCommand,
    },

    /// Monthly budgets per category
    Budget {
        #[command(subcommand)]
        command: budget_cmd::BudgetCommand,
    },

    /// Savings goals
    Goal {
        #[command(subcommand)]
        command: goal_cmd::GoalCommand,
    },

    /// Spending summary
    Insights,

    /// Show which category a merchant would be auto-categorised as
    Classify { merchant: String },

    /// Show or toggle the dark theme flag
    Theme {
        #[arg(long)]
        toggle: bool,
    },

    /// Premium plan (local demo)
    Premium {
        #[command(subcommand)]
        command: Option<pages::PremiumCommand>,
    },

    /// Configuration file at ~/.pigeon/config.toml
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommand>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    logging::init(&cfg.logging);
    debug!(command = ?cli.command, "starting");

    // one store per run, handed to whichever page runs
    let open = || state::open_store(&cfg, cli.data_dir.clone());

    match cli.command {
        Command::Dashboard => pages::dashboard(&cfg, &mut open()?),
        Command::Tx { command } => tx_cmd::run(command, &cfg, &mut open()?),
        Command::Budget { command } => budget_cmd::run(command, &cfg, &mut open()?),
        Command::Goal { command } => goal_cmd::run(command, &cfg, &mut open()?),
        Command::Insights => pages::insights(&cfg, &mut open()?),
        Command::Classify { merchant } => {
            pages::classify_merchant(&merchant);
            Ok(())
        }
        Command::Theme { toggle } => pages::theme(&mut open()?, toggle),
        Command::Premium { command } => pages::premium(&mut open()?, command),
        Command::Config { command } => match command.unwrap_or(ConfigCommand::Show) {
            ConfigCommand::Init => config::init_config(),
            ConfigCommand::Show => config::show_config(&cfg),
        },
    }
}
