use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;

/// Print rendered result rows (header row first) with the run summary
pub fn display_results(rows: &[Vec<String>], row_count: &str, compile_time: &str, execution_time: &str) {
    let Some((header, body)) = rows.split_first() else {
        println!("{}", "No results found.".yellow());
        return;
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    // Set headers
    let headers: Vec<Cell> = header
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
        .collect();
    table.set_header(headers);

    // Add rows
    for row in body {
        table.add_row(row.clone());
    }

    println!("{table}");
    println!(
        "\n{}",
        format!(
            "{} rows returned (compile {}, execute {})",
            row_count, compile_time, execution_time
        )
        .green()
    );
}

/// Print the error block: exception line, then details
pub fn display_error(exception: &str, details: &str) {
    eprintln!("{}", exception.red().bold());
    if !details.is_empty() {
        eprintln!("{}", details);
    }
}
