use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::history::DefaultHistory;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

use userlist_application::RecordListUseCase;
use userlist_core::notice::Notice;
use userlist_core::record::{Record, RecordRepository};
use userlist_infrastructure::{
    ChannelNotifier, ConfigService, InMemoryRecordRepository, PostgrestRecordRepository,
};

mod commands;
mod helper;

use commands::{Flow, render};
use helper::{CliHelper, KnownIds};

#[derive(Parser)]
#[command(name = "userlist")]
#[command(about = "userlist - list, add, update and delete users of one remote table", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/userlist/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the table name from the config
    #[arg(long)]
    table: Option<String>,

    /// Run against an in-memory table instead of the backend
    #[arg(long)]
    offline_demo: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_repository(cli: &Cli) -> Result<Arc<dyn RecordRepository>> {
    if cli.offline_demo {
        tracing::info!("[Bootstrap] Using in-memory table");
        return Ok(Arc::new(InMemoryRecordRepository::with_records(vec![
            Record::new(1, "Ada Lovelace", "F"),
            Record::new(2, "Alan Turing", "M"),
        ])));
    }

    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path.clone()),
        None => ConfigService::new(),
    };
    let mut config = config_service
        .get_config()
        .context("Failed to load backend configuration")?;
    if let Some(table) = &cli.table {
        config = config.with_table(table).validate()?;
    }

    Ok(Arc::new(PostgrestRecordRepository::new(&config)?))
}

fn drain_notices(notices: &mut UnboundedReceiver<Notice>) {
    while let Ok(notice) = notices.try_recv() {
        render::print_notice(&notice);
    }
}

/// The main entry point for the userlist REPL.
///
/// Sets up logging and the repository, loads the list once, then maps each
/// input line to one use case operation. Notices raised by an operation are
/// printed right after it.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    // ===== Backend Initialization =====
    let repository = build_repository(&cli)?;
    let (notifier, mut notices) = ChannelNotifier::channel();
    let usecase = RecordListUseCase::new(repository, Arc::new(notifier));

    println!("{}", "=== userlist ===".bright_magenta().bold());
    println!("{}", "Type 'help' for commands, or 'quit' to exit.".bright_black());
    println!();

    // Initial load; a failure leaves an empty list and the REPL usable
    match usecase.load().await {
        Ok(_) => render::print_state(&usecase.state().await),
        Err(e) => println!("{}", format!("Could not fetch users: {}", e).red()),
    }

    // ===== REPL Setup =====
    let known_ids = KnownIds::default();
    known_ids.replace(&usecase.records().await);
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new(known_ids.clone())));

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match commands::parse(trimmed) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message.bright_black());
                        continue;
                    }
                };

                let flow = commands::execute(&usecase, command).await?;
                drain_notices(&mut notices);
                known_ids.replace(&usecase.records().await);

                if flow == Flow::Exit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
