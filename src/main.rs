use anyhow::Context;
use chrono::Local;
use clap::Parser;
use fintrack::args::{Args, Command};
use fintrack::{commands, Config, Ledger, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();

    if let Command::Init = args.command() {
        commands::init(home)?.print();
        return Ok(());
    }

    let config = Config::load(home)?;
    let mut ledger = if args.common().empty() {
        Ledger::new()
    } else if let Some(path) = args.common().ledger() {
        Ledger::load(path).context("Unable to load the starting ledger")?
    } else {
        Ledger::sample()
    };

    let today = Local::now().date_naive();
    commands::execute(&mut ledger, &config, args.command(), today)
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
