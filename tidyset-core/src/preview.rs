use crate::output::PlanResult;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use nu_ansi_term::Color::{Green, Yellow};
use std::fmt::Write;

/// Render a rename plan as a table for terminal review.
pub fn render_plan(result: &PlanResult, use_color: bool) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Original").fg(Color::Cyan),
        Cell::new("New").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
    ]);

    for mapping in &result.files {
        let status = if mapping.original == mapping.new {
            "unchanged"
        } else {
            "renamed"
        };
        let mut new_cell = Cell::new(&mapping.new);
        if use_color && status == "renamed" {
            new_cell = new_cell.fg(Color::Green);
        }
        table.add_row(vec![Cell::new(&mapping.original), new_cell, Cell::new(status)]);
    }

    let mut output = format!("{table}\n");
    let line = format!(
        "{} renamed, {} unchanged, {} collisions",
        result.summary.renamed, result.summary.unchanged, result.summary.collisions
    );
    if use_color {
        let styled = if result.summary.collisions > 0 {
            Yellow.paint(line).to_string()
        } else {
            Green.paint(line).to_string()
        };
        writeln!(output, "{styled}").unwrap();
    } else {
        writeln!(output, "{line}").unwrap();
    }
    output
}
