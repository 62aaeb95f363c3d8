use caixa::{JsonFileStore, Ledger};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "caixa.toml";
const DEFAULT_STORE: &str = "caixa.json";

#[derive(Parser, Debug)]
#[clap(version, about, propagate_version = true)]
struct Cli {
    /// Path to the storage file; falls back to caixa.toml, then ./caixa.json
    #[clap(short, long, value_parser)]
    file: Option<PathBuf>,

    /// Action to perform
    #[clap(subcommand)]
    action: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Show the current balance
    Balance,
    /// List all transactions
    List,
    /// Record a new transaction
    Add(Add),
    /// Remove a transaction by id
    Remove(Remove),
}

#[derive(Args, Debug)]
struct Add {
    /// What the money moved for
    #[clap(short, long, value_parser)]
    description: String,

    /// Signed amount: positive for income, negative for expense
    #[clap(short, long, value_parser, allow_hyphen_values = true)]
    amount: String,

    /// Transaction date (YYYY-MM-DD); defaults to now
    #[clap(short = 't', long, value_parser)]
    date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct Remove {
    /// Id of the transaction, as shown by `list`
    #[clap(value_parser)]
    id: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct StorageConfig {
    path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct AppConfig {
    storage: StorageConfig,
}

impl AppConfig {
    fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_content = fs::read_to_string(filepath)
            .with_context(|| "failed to read config file")?;
        let config = toml::from_str(&file_content)
            .with_context(|| "failed to parse config file")?;
        Ok(config)
    }
}

fn resolve_store_path(flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if Path::new(CONFIG_FILE).exists() {
        let config = AppConfig::read(CONFIG_FILE)?;
        return Ok(config.storage.path);
    }
    Ok(PathBuf::from(DEFAULT_STORE))
}

fn print_balance(balance: &str) {
    let numeric: f64 = balance.parse().unwrap_or(0.0);
    let color = if numeric < 0.0 {
        colored::ColoredString::bright_red
    } else if numeric > 0.0 {
        colored::ColoredString::green
    } else {
        colored::ColoredString::normal
    };
    println!("{}", color(balance.white()));
}

fn as_datetime(date: Option<NaiveDate>) -> DateTime<Utc> {
    match date {
        Some(day) => day.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let path = resolve_store_path(args.file)?;
    let store = JsonFileStore::new(&path);
    let mut ledger = Ledger::new(store);
    ledger
        .refresh()
        .with_context(|| format!("failed to open ledger at {}", path.display()))?;

    match args.action {
        Subcommands::Balance => {
            print_balance(&ledger.balance());
        }
        Subcommands::List => {
            for transaction in ledger.transactions() {
                println!("{}  {}", transaction.id.dimmed(), transaction);
            }
        }
        Subcommands::Add(add) => {
            let recorded = ledger
                .add_transaction(&add.description, &add.amount, as_datetime(add.date))
                .with_context(|| "could not add transaction")?;
            println!("recorded {}  {}", recorded.id.dimmed(), recorded);
        }
        Subcommands::Remove(remove) => {
            ledger
                .remove_transaction(&remove.id)
                .with_context(|| format!("could not remove transaction {}", remove.id))?;
            println!("removed {}", remove.id);
        }
    }

    Ok(())
}
