use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Header plus rows at each column's natural width. Values are never
/// truncated; a too-narrow terminal wraps rather than losing data.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let mut widths = columns
        .iter()
        .map(|column| column.name.len())
        .collect::<Vec<usize>>();
    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.chars().count());
            }
        }
    }

    let mut output = Vec::with_capacity(rows.len() + 1);
    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    output.push(format_row(columns, &header, &widths));
    for row in rows {
        output.push(format_row(columns, row, &widths));
    }
    output
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let mut pieces = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        let width = *widths.get(index).unwrap_or(&0);
        let value = cells.get(index).cloned().unwrap_or_default();

        let piece = match column.align {
            Align::Left => format!("{value:<width$}"),
            Align::Right => format!("{value:>width$}"),
        };
        pieces.push(piece);
    }

    let line = format!(
        "{}{}",
        " ".repeat(INDENT),
        pieces.join(&" ".repeat(COLUMN_GAP))
    );
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::{Align, Column, key_value_rows, render_table};

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Rows read:", "100".to_string()),
                ("Rows invalid:", "0".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Rows read:     100");
        assert_eq!(rows[1], "  Rows invalid:  0");
    }

    #[test]
    fn table_pads_to_the_widest_cell_per_column() {
        let columns = [
            Column {
                name: "Supplier",
                align: Align::Left,
            },
            Column {
                name: "Amount",
                align: Align::Right,
            },
        ];
        let rows = vec![
            vec!["ACME LTD".to_string(), "100.00".to_string()],
            vec!["A MUCH LONGER SUPPLIER NAME".to_string(), "5.00".to_string()],
        ];

        let rendered = render_table(&columns, &rows);
        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].starts_with("  Supplier"));
        assert!(rendered[0].ends_with("Amount"));
        assert!(rendered[1].contains("ACME LTD"));
        assert!(rendered[1].ends_with("100.00"));
        assert!(rendered[2].contains("A MUCH LONGER SUPPLIER NAME"));
    }

    #[test]
    fn right_alignment_pads_on_the_left() {
        let columns = [Column {
            name: "Count",
            align: Align::Right,
        }];
        let rows = vec![vec!["7".to_string()]];

        let rendered = render_table(&columns, &rows);
        assert_eq!(rendered[1], "      7");
    }
}
