use basicguard_core::Verdict;
use colored::Colorize;
use prettytable::{Cell, Row, Table, format};

pub fn print_error_message(error_message: &str) {
    println!("{}", error_message.red());
}

pub fn print_warn_message(warn_message: &str) {
    println!("{}", warn_message.yellow());
}

pub fn print_success_message(success_message: &str) {
    println!("{}", success_message.green());
}

/// Green for allowed, red for any denial.
pub fn verdict_cell(verdict: Verdict) -> Cell {
    if verdict.is_allowed() {
        Cell::new(verdict.as_str()).style_spec("Fg")
    } else {
        Cell::new(verdict.as_str()).style_spec("Fr")
    }
}

pub fn print_table<T: AsRef<str>>(
    headers: Vec<T>,
    rows: Vec<Vec<Cell>>,
    title: Option<&str>,
    footer: Option<&str>,
) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

    let header_cells =
        headers.into_iter().map(|h| Cell::new(h.as_ref()).style_spec("Fb")).collect();
    table.add_row(Row::new(header_cells));

    for cells in rows {
        table.add_row(Row::new(cells));
    }

    if let Some(title_text) = title {
        println!("\n{}", title_text);
    }

    table.printstd();

    if let Some(footer_text) = footer {
        println!("\n{}", footer_text);
    }
}
