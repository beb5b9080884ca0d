use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use recurdo_core::period::Period;

#[derive(Debug, Clone)]
pub struct ViewCandidate {
    pub content: String,
    pub due_date: NaiveDate,
    pub period: Period,
    /// Number of tasks a copy would create, the labeled task included
    pub subtree_size: usize,
    pub due_before_cutoff: bool,
    pub url: String,
}

pub fn display_candidates(candidates: &[ViewCandidate], cutoff: NaiveDate) {
    if candidates.is_empty() {
        println!("No labeled tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Task", "Due", "Every", "Tasks", "Due before cutoff", "URL"]);

    for candidate in candidates {
        let mut row = Row::new();

        let mut name_cell = Cell::new(&candidate.content);
        if candidate.due_before_cutoff {
            name_cell = name_cell.fg(Color::Yellow).add_attribute(Attribute::Bold);
        }
        row.add_cell(name_cell);
        row.add_cell(Cell::new(candidate.due_date.format("%Y-%m-%d").to_string()));
        row.add_cell(Cell::new(candidate.period.to_string()));
        row.add_cell(Cell::new(candidate.subtree_size));

        let due_cell = if candidate.due_before_cutoff {
            Cell::new("yes").fg(Color::Yellow)
        } else {
            Cell::new("no").fg(Color::DarkGrey)
        };
        row.add_cell(due_cell);
        row.add_cell(Cell::new(&candidate.url).fg(Color::DarkGrey));

        table.add_row(row);
    }

    println!("{table}");

    let due = candidates.iter().filter(|c| c.due_before_cutoff).count();
    println!(
        "{} labeled task(s), {} due before {}",
        candidates.len(),
        due,
        cutoff
    );
}
