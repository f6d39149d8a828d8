use std::process::ExitCode;

use anyhow::Context;
use bookkeeping::{
    cli::{self, CliArgs, Command},
    config::Config,
    logging, storage,
};
use clap::Parser;

fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = Config::load(&args)?;
    logging::init(&config.logging);
    tracing::debug!(?config, "Configuration loaded");

    if args.command == Command::Deletedb {
        storage::delete_database(&config.storage).context("failed to delete database")?;
        return Ok(());
    }

    let book = storage::open(&config)
        .with_context(|| format!("failed to open database in {}", config.storage.data_dir.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli::execute(&book, &args.command, args.json, &mut out)
}

fn main() -> ExitCode {
    match run(CliArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
