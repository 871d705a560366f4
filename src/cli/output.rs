//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{Level, Notice, Outcome};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Render one notice with the style matching its level.
pub fn notice(notice: &Notice) {
    match notice.level {
        Level::Info => info(&notice.message),
        Level::Warning => warning(&notice.message),
        Level::Error => error(&notice.message),
    }
}

/// Render every notice an outcome carries.  Info notices of successful
/// outcomes are shown as success lines.
pub fn outcome(outcome: &Outcome) {
    let succeeded = outcome.is_success();

    for n in outcome.notices() {
        if succeeded && n.level == Level::Info {
            success(&n.message);
        } else {
            notice(&n);
        }
    }
}

/// Print a table of snippet names in storage order.
pub fn print_snippets_table(names: &[String]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name"]);

    for (i, name) in names.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), name.clone()]);
    }

    println!("{table}");
}
