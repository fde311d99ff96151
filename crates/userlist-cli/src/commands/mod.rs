//! REPL commands.
//!
//! `parse` turns one input line into a `Command`; `execute` runs it against
//! the use case. Parsing is pure so it can be tested without a terminal.

pub mod render;

use anyhow::Result;
use colored::Colorize;
use userlist_application::RecordListUseCase;
use userlist_core::record::RecordId;

/// Static description of one REPL command, shared by help, completion and
/// hints.
#[derive(Debug)]
pub struct CommandInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Argument placeholder, if the command takes one.
    pub args: Option<&'static str>,
    pub about: &'static str,
}

impl CommandInfo {
    /// Whether the argument is a record key.
    pub fn takes_id(&self) -> bool {
        self.args == Some(ID_ARG)
    }

    pub fn usage(&self) -> String {
        match self.args {
            Some(args) => format!("{} {}", self.name, args),
            None => self.name.to_string(),
        }
    }
}

const ID_ARG: &str = "<id>";
const TEXT_ARG: &str = "<text>";

pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo { name: "list", aliases: &["ls"], args: None, about: "show the cached list" },
    CommandInfo { name: "reload", aliases: &[], args: None, about: "fetch every row again" },
    CommandInfo { name: "name", aliases: &[], args: Some(TEXT_ARG), about: "set the full name of the add form" },
    CommandInfo { name: "gender", aliases: &[], args: Some(TEXT_ARG), about: "set the gender of the add form" },
    CommandInfo { name: "add", aliases: &[], args: None, about: "create a user from the add form" },
    CommandInfo { name: "select", aliases: &[], args: Some(ID_ARG), about: "pick a row for update" },
    CommandInfo { name: "edit-name", aliases: &[], args: Some(TEXT_ARG), about: "edit the selected full name" },
    CommandInfo { name: "edit-gender", aliases: &[], args: Some(TEXT_ARG), about: "edit the selected gender" },
    CommandInfo { name: "update", aliases: &[], args: None, about: "submit the selected row" },
    CommandInfo { name: "cancel", aliases: &[], args: None, about: "drop the selection" },
    CommandInfo { name: "delete", aliases: &["rm"], args: Some(ID_ARG), about: "delete a row" },
    CommandInfo { name: "help", aliases: &["?"], args: None, about: "show this help" },
    CommandInfo { name: "quit", aliases: &["exit"], args: None, about: "exit" },
];

/// Finds a command by name or alias.
pub fn lookup(word: &str) -> Option<&'static CommandInfo> {
    COMMANDS
        .iter()
        .find(|info| info.name == word || info.aliases.contains(&word))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Reload,
    DraftName(String),
    DraftGender(String),
    Add,
    Select(RecordId),
    EditName(String),
    EditGender(String),
    Update,
    Cancel,
    Delete(RecordId),
    Help,
    Quit,
}

/// Whether the REPL keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Parses one trimmed, non-empty input line.
pub fn parse(line: &str) -> std::result::Result<Command, String> {
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let key = |rest: &str| -> std::result::Result<RecordId, String> {
        if rest.is_empty() {
            Err(format!("'{}' needs a record id", name))
        } else {
            let Ok(id) = rest.parse::<RecordId>();
            Ok(id)
        }
    };

    match name {
        "list" | "ls" => Ok(Command::List),
        "reload" => Ok(Command::Reload),
        "name" => Ok(Command::DraftName(rest.to_string())),
        "gender" => Ok(Command::DraftGender(rest.to_string())),
        "add" => Ok(Command::Add),
        "select" => key(rest).map(Command::Select),
        "edit-name" => Ok(Command::EditName(rest.to_string())),
        "edit-gender" => Ok(Command::EditGender(rest.to_string())),
        "update" => Ok(Command::Update),
        "cancel" => Ok(Command::Cancel),
        "delete" | "rm" => key(rest).map(Command::Delete),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
    }
}

pub fn print_help() {
    for info in COMMANDS {
        println!(
            "  {} {}",
            format!("{:<20}", info.usage()).bright_cyan(),
            info.about.bright_black()
        );
    }
}

/// Runs a command. Operation failures are reported, not propagated; only
/// terminal errors end the REPL.
pub async fn execute(usecase: &RecordListUseCase, command: Command) -> Result<Flow> {
    let outcome = match command {
        Command::List => {
            render::print_state(&usecase.state().await);
            Ok(())
        }
        Command::Reload => match usecase.load().await {
            Ok(count) => {
                println!("{}", format!("Loaded {} users", count).bright_black());
                render::print_state(&usecase.state().await);
                Ok(())
            }
            Err(e) => Err(e),
        },
        Command::DraftName(text) => {
            usecase.set_draft_full_name(text).await;
            Ok(())
        }
        Command::DraftGender(text) => {
            usecase.set_draft_gender(text).await;
            Ok(())
        }
        Command::Add => usecase.submit_draft().await.map(|inserted| {
            if inserted.is_empty() {
                println!("{}", "User created. Reload to see it.".bright_black());
            } else {
                for record in inserted {
                    println!("{}", format!("User created: {}", record.id).green());
                }
            }
        }),
        Command::Select(id) => usecase.select(&id).await,
        Command::EditName(text) => usecase.edit_selection_full_name(text).await,
        Command::EditGender(text) => usecase.edit_selection_gender(text).await,
        Command::Update => usecase.submit_selection().await,
        Command::Cancel => {
            usecase.clear_selection().await;
            Ok(())
        }
        Command::Delete(id) => usecase.delete(&id).await,
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Quit => return Ok(Flow::Exit),
    };

    if let Err(e) = outcome {
        println!("{}", format!("  ({})", e).bright_black());
    }

    Ok(Flow::Continue)
}
