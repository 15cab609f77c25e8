// Pure table rendering functions that depend only on the statement result
// This is completely decoupled from the host document

use crate::api::models::ColumnInfo;
use crate::error::QueryError;
use crate::ui::dom::Node;
use serde_json::Value;

/// Build the rows of a result table: one header row, then `row_count` body
/// rows read from the column-major `values`.
///
/// The body never grows past the longest data column, whatever count the
/// server advertised.
pub fn build_table(columns: &[ColumnInfo], values: &[Vec<Value>], row_count: usize) -> Vec<Node> {
    let available = values.iter().map(Vec::len).max().unwrap_or(0);
    let mut rows = vec![build_header_row(columns)];
    rows.extend(build_data_rows(columns, values, row_count.min(available)));
    rows
}

/// Build the error block shown in place of the table
pub fn build_error_block(err: &QueryError) -> Vec<Node> {
    vec![
        Node::with_text("b", format!("Error: {}", err.exception_name())),
        Node::element("br", vec![]),
        Node::with_text("span", err.details()),
    ]
}

fn build_header_row(columns: &[ColumnInfo]) -> Node {
    Node::element(
        "tr",
        columns
            .iter()
            .map(|column| Node::with_text("th", column.name.as_str()))
            .collect(),
    )
}

fn build_data_rows(columns: &[ColumnInfo], values: &[Vec<Value>], row_count: usize) -> Vec<Node> {
    (0..row_count)
        .map(|row| {
            let cells = (0..columns.len())
                .map(|col| {
                    let text = values
                        .get(col)
                        .and_then(|column| column.get(row))
                        .map(cell_text)
                        .unwrap_or_default();
                    Node::with_text("td", text)
                })
                .collect();
            Node::element("tr", cells)
        })
        .collect()
}

/// Display text of a single cell
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "NULL".to_string(),
        v => v.to_string(),
    }
}
