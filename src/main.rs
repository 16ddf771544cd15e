use clap::Parser;
use colored::Colorize;
use eyre::Result;
use std::process;
use todo::{Cli, Config, TaskStore, commands, config, models, table};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so the table on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_from(config::normalize_args(std::env::args_os()));

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::try_from(cli)?;
    let store = TaskStore::open(&config.file);

    let tasks = commands::execute(&store, &config.action, models::now())?;
    table::print_tasks(&tasks);

    Ok(())
}
