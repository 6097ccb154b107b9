use chrono::NaiveDate;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

use crate::application::DueSummary;
use crate::domain::{Bill, Cents, DueState, format_cents, format_user_date};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Warning,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Warning => style(text).red().bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Terminal color for a due state. Settled bills keep the default color.
pub fn due_color(state: DueState) -> Option<Color> {
    match state {
        DueState::Overdue => Some(Color::Red),
        DueState::DueToday => Some(Color::Yellow),
        DueState::Upcoming => Some(Color::Green),
        DueState::Settled => None,
    }
}

/// Due date cell colored by how close the bill is to its due date.
pub fn due_date_cell(date: NaiveDate, state: DueState) -> Cell {
    let cell = Cell::new(format_user_date(date));
    match due_color(state) {
        Some(color) => cell.fg(color),
        None => cell,
    }
}

pub fn amount_cell(amount_cents: Cents, currency_symbol: &str) -> Cell {
    Cell::new(format_amount(amount_cents, currency_symbol)).set_alignment(CellAlignment::Right)
}

pub fn format_amount(amount_cents: Cents, currency_symbol: &str) -> String {
    format!("{}{}", currency_symbol, format_cents(amount_cents))
}

/// Render bills as a table, one row per bill, in the order given.
pub fn bills_table(bills: &[Bill], today: NaiveDate, currency_symbol: &str) -> Table {
    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Amount"),
        header_cell("Due"),
        header_cell("Recurrence"),
        header_cell("Status"),
    ]);

    for bill in bills {
        let state = bill.due_state(today);
        table.add_row(vec![
            Cell::new(bill.id).set_alignment(CellAlignment::Right),
            Cell::new(&bill.name),
            amount_cell(bill.amount_cents, currency_symbol),
            due_date_cell(bill.due_date, state),
            Cell::new(bill.recurrence),
            Cell::new(bill.status),
        ]);
    }

    table
}

/// Footer lines printed under the bill table.
pub fn summary_lines(summary: &DueSummary, currency_symbol: &str) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} ({} pending, {} paid)",
        style_text("Pending total:", StyleType::TotalLabel),
        style_text(
            &format_amount(summary.pending_total, currency_symbol),
            StyleType::TotalValue
        ),
        summary.pending(),
        summary.settled
    )];

    if summary.overdue > 0 {
        lines.push(style_text(
            &format!(
                "{} overdue: {}",
                summary.overdue,
                format_amount(summary.overdue_total, currency_symbol)
            ),
            StyleType::Warning,
        ));
    }
    if summary.due_today > 0 {
        lines.push(format!("{} due today", summary.due_today));
    }

    lines
}
