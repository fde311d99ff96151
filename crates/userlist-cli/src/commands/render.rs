//! Text rendering of the list state.

use colored::Colorize;
use userlist_core::notice::{Notice, NoticeLevel};
use userlist_core::record::{Record, RecordListState};

const ID_WIDTH: usize = 8;
const NAME_WIDTH: usize = 24;

/// Formats one row of the list: `id | full name | gender`.
pub fn format_row(record: &Record) -> String {
    format!(
        "{:<id$} {:<name$} {}",
        record.id.to_string(),
        record.full_name,
        record.gender,
        id = ID_WIDTH,
        name = NAME_WIDTH
    )
}

pub fn format_header() -> String {
    format!(
        "{:<id$} {:<name$} {}",
        "id",
        "fullname",
        "gender",
        id = ID_WIDTH,
        name = NAME_WIDTH
    )
}

pub fn print_state(state: &RecordListState) {
    println!("{}", format_header().bold());
    if state.is_empty() {
        println!("{}", "(no users)".bright_black());
    }
    for record in state.records() {
        let selected = state
            .selection()
            .is_some_and(|selection| selection.id == record.id);
        let line = format_row(record);
        if selected {
            println!("{}", line.bright_yellow());
        } else {
            println!("{}", line);
        }
    }

    let draft = state.draft();
    if !draft.full_name.is_empty() || !draft.gender.is_empty() {
        println!(
            "{}",
            format!("add form: '{}' / '{}'", draft.full_name, draft.gender).bright_black()
        );
    }
    if let Some(selection) = state.selection() {
        println!(
            "{}",
            format!(
                "editing {}: '{}' / '{}'",
                selection.id, selection.full_name, selection.gender
            )
            .bright_yellow()
        );
    }
}

pub fn print_notice(notice: &Notice) {
    let line = format!("[{}] {}", notice.title(), notice.message);
    match notice.level {
        NoticeLevel::Success => println!("{}", line.bright_green()),
        NoticeLevel::Error => println!("{}", line.red()),
    }
}
