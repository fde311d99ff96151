//! rustyline helper: command and record key completion.
//!
//! The first word completes against the command table. For commands that take
//! a record key (`select`, `delete`), the argument completes against the keys
//! of the last rendered list, which the REPL loop keeps in `KnownIds`.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::{Arc, RwLock};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use userlist_core::record::Record;

use crate::commands::{COMMANDS, CommandInfo, lookup};

/// Record keys of the cached list, shared between the REPL loop and the helper.
#[derive(Debug, Clone, Default)]
pub struct KnownIds(Arc<RwLock<Vec<String>>>);

impl KnownIds {
    pub fn replace(&self, records: &[Record]) {
        if let Ok(mut ids) = self.0.write() {
            *ids = records.iter().map(|record| record.id.to_string()).collect();
        }
    }

    fn starting_with(&self, prefix: &str) -> Vec<String> {
        self.0
            .read()
            .map(|ids| ids.iter().filter(|id| id.starts_with(prefix)).cloned().collect())
            .unwrap_or_default()
    }

    fn contains(&self, id: &str) -> bool {
        self.0
            .read()
            .map(|ids| ids.iter().any(|known| known == id))
            .unwrap_or(false)
    }
}

/// Where the cursor sits in the input line.
#[derive(Debug)]
enum Slot<'a> {
    /// Still typing the command word.
    Command(&'a str),
    /// Typing the single argument of a known command, starting at `start`.
    Argument {
        command: &'static CommandInfo,
        start: usize,
        prefix: &'a str,
    },
    /// Nothing to offer.
    Other,
}

fn slot(line: &str) -> Slot<'_> {
    let Some((word, rest)) = line.split_once(' ') else {
        return Slot::Command(line);
    };
    match lookup(word) {
        Some(command) => {
            let start = line.len() - rest.trim_start().len();
            Slot::Argument {
                command,
                start,
                prefix: &line[start..],
            }
        }
        None => Slot::Other,
    }
}

fn is_command_prefix(word: &str) -> bool {
    COMMANDS.iter().any(|info| {
        info.name.starts_with(word) || info.aliases.iter().any(|alias| alias.starts_with(word))
    })
}

pub struct CliHelper {
    ids: KnownIds,
}

impl CliHelper {
    pub fn new(ids: KnownIds) -> Self {
        Self { ids }
    }

    /// Completion candidates for the text left of the cursor.
    fn candidates(&self, line: &str) -> (usize, Vec<Pair>) {
        match slot(line) {
            Slot::Command(prefix) => {
                let pairs = COMMANDS
                    .iter()
                    .filter(|info| info.name.starts_with(prefix))
                    .map(|info| Pair {
                        display: info.usage(),
                        // Commands with an argument get the separating space
                        replacement: match info.args {
                            Some(_) => format!("{} ", info.name),
                            None => info.name.to_string(),
                        },
                    })
                    .collect();
                (0, pairs)
            }
            Slot::Argument {
                command,
                start,
                prefix,
            } if command.takes_id() => {
                let pairs = self
                    .ids
                    .starting_with(prefix)
                    .into_iter()
                    .map(|id| Pair {
                        display: id.clone(),
                        replacement: id,
                    })
                    .collect();
                (start, pairs)
            }
            _ => (0, Vec::new()),
        }
    }

    /// Inline suffix shown after the cursor.
    fn suffix(&self, line: &str) -> Option<String> {
        match slot(line) {
            Slot::Command(prefix) if !prefix.is_empty() => COMMANDS
                .iter()
                .find(|info| info.name.starts_with(prefix) && info.name.len() > prefix.len())
                .map(|info| info.name[prefix.len()..].to_string()),
            Slot::Argument {
                command, prefix, ..
            } if command.takes_id() => self
                .ids
                .starting_with(prefix)
                .into_iter()
                .find(|id| id.len() > prefix.len())
                .map(|id| id[prefix.len()..].to_string()),
            _ => None,
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos]))
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        // Only hint at the end of the line
        if pos < line.len() {
            return None;
        }
        self.suffix(line)
    }
}

impl Highlighter for CliHelper {
    /// Known commands in cyan, unknown ones in red, known record keys in yellow.
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let split = line.find(' ').unwrap_or(line.len());
        let (word, rest) = line.split_at(split);

        let word = match lookup(word) {
            Some(_) => word.bright_cyan(),
            None if is_command_prefix(word) => return Borrowed(line),
            None => word.red(),
        };
        let rest = match slot(line) {
            Slot::Argument {
                command, prefix, ..
            } if command.takes_id() && self.ids.contains(prefix) => rest.bright_yellow(),
            _ => rest.normal(),
        };

        Owned(format!("{}{}", word, rest))
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Validator for CliHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper_with(records: &[Record]) -> CliHelper {
        let ids = KnownIds::default();
        ids.replace(records);
        CliHelper::new(ids)
    }

    fn replacements(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|pair| pair.replacement).collect()
    }

    #[test]
    fn test_command_word_completion() {
        let helper = helper_with(&[]);

        let (start, pairs) = helper.candidates("ed");
        assert_eq!(start, 0);
        assert_eq!(replacements(pairs), vec!["edit-name ", "edit-gender "]);

        let (_, pairs) = helper.candidates("upd");
        assert_eq!(replacements(pairs), vec!["update"]);
    }

    #[test]
    fn test_record_key_completion_after_keyed_commands() {
        let helper = helper_with(&[
            Record::new(12, "A", "M"),
            Record::new(13, "B", "F"),
            Record::new(27, "C", "M"),
        ]);

        let (start, pairs) = helper.candidates("delete 1");
        assert_eq!(start, 7);
        assert_eq!(replacements(pairs), vec!["12", "13"]);

        let (start, pairs) = helper.candidates("rm  2");
        assert_eq!(start, 4);
        assert_eq!(replacements(pairs), vec!["27"]);

        // Text arguments are free-form
        let (_, pairs) = helper.candidates("name 1");
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_known_ids_follow_the_list() {
        let ids = KnownIds::default();
        let helper = CliHelper::new(ids.clone());
        assert!(helper.candidates("select ").1.is_empty());

        ids.replace(&[Record::new("a1", "A", "M")]);
        assert_eq!(replacements(helper.candidates("select ").1), vec!["a1"]);
    }

    #[test]
    fn test_suffix_hints() {
        let helper = helper_with(&[Record::new(42, "A", "M")]);

        assert_eq!(helper.suffix("rel"), Some("oad".to_string()));
        assert_eq!(helper.suffix("select 4"), Some("2".to_string()));
        assert_eq!(helper.suffix("select 42"), None);
        assert_eq!(helper.suffix(""), None);
        assert_eq!(helper.suffix("frob x"), None);
    }
}
