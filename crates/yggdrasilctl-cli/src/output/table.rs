//! Aligned text tables for section → row → column payloads.
//!
//! The payload shape is `{section: {row_key: {column: scalar}}}`. Columns come
//! from the first row found and are shared by every section, as are the
//! column widths, so all sections line up with each other.

use serde_json::{Map, Value};

use super::scalar::{display_cell, display_width, push_field};

/// One section of the payload with its rows in print order.
struct Section<'a> {
    rows: Vec<(&'a str, &'a Map<String, Value>)>,
}

/// Typed view over a tabular payload.
struct Grid<'a> {
    sections: Vec<Section<'a>>,
    columns: Vec<&'a str>,
}

/// Maximum printable width per column, including the synthetic key column.
#[derive(Debug, PartialEq, Eq)]
struct ColumnWidths {
    key: usize,
    columns: Vec<usize>,
}

impl<'a> Grid<'a> {
    /// Builds the view, or `None` when any level is not a mapping.
    fn from_response(response: &'a Value) -> Option<Self> {
        let sections = sorted_entries(response.as_object()?)
            .into_iter()
            .map(|(_, section)| {
                let rows = sorted_entries(section.as_object()?)
                    .into_iter()
                    .map(|(key, row)| row.as_object().map(|fields| (key, fields)))
                    .collect::<Option<Vec<_>>>()?;
                Some(Section { rows })
            })
            .collect::<Option<Vec<_>>>()?;

        let columns = sections
            .iter()
            .find_map(|section| section.rows.first())
            .map(|&(_, row)| {
                let mut names: Vec<&str> = row.keys().map(String::as_str).collect();
                names.sort_unstable();
                names
            })
            .unwrap_or_default();

        Some(Self { sections, columns })
    }

    fn rows(&self) -> impl Iterator<Item = &(&'a str, &'a Map<String, Value>)> {
        self.sections.iter().flat_map(|section| section.rows.iter())
    }

    fn widths(&self) -> ColumnWidths {
        let key = self
            .rows()
            .map(|(key, _)| display_width(key))
            .max()
            .unwrap_or(0);
        let columns = self
            .columns
            .iter()
            .map(|column| {
                self.rows()
                    .map(|(_, row)| display_width(&display_cell(row.get(*column))))
                    .fold(display_width(column), usize::max)
            })
            .collect();
        ColumnWidths { key, columns }
    }

    fn render(&self) -> String {
        let widths = self.widths();
        let mut output = String::new();
        for section in &self.sections {
            if section.rows.is_empty() {
                continue;
            }
            if !self.columns.is_empty() {
                let mut header = String::new();
                push_field(&mut header, "", widths.key);
                for (column, width) in self.columns.iter().zip(&widths.columns) {
                    push_field(&mut header, column, *width);
                }
                output.push_str(&header);
                output.push('\n');
            }
            for (key, row) in &section.rows {
                let mut line = String::new();
                push_field(&mut line, key, widths.key);
                for (column, width) in self.columns.iter().zip(&widths.columns) {
                    push_field(&mut line, &display_cell(row.get(*column)), *width);
                }
                output.push_str(&line);
                output.push('\n');
            }
        }
        output
    }
}

fn sorted_entries(map: &Map<String, Value>) -> Vec<(&str, &Value)> {
    let mut entries: Vec<(&str, &Value)> = map
        .iter()
        .map(|(key, value)| (key.as_str(), value))
        .collect();
    entries.sort_unstable_by(|left, right| left.0.cmp(right.0));
    entries
}

/// Renders a tabular payload, or `None` when it is not shaped as
/// section → row → column mappings.
pub(crate) fn render_table(response: &Value) -> Option<String> {
    Grid::from_response(response).map(|grid| grid.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn single_peer_renders_header_and_row() {
        let response = json!({"peers": {"fc00::1": {"bytes_sent": 10, "bytes_recvd": 20}}});
        let rendered = render_table(&response).expect("payload is tabular");
        assert_eq!(
            lines(&rendered),
            vec![
                "         bytes_recvd  bytes_sent  ",
                "fc00::1  20           10          ",
            ]
        );
    }

    #[test]
    fn columns_are_sorted_and_shared_across_sections() {
        let response = json!({
            "first": {"r1": {"b": "x", "a": "longer-value"}},
            "second": {"row-two": {"a": 1, "b": "wide-b-value"}}
        });
        let rendered = render_table(&response).expect("payload is tabular");
        assert_eq!(
            lines(&rendered),
            vec![
                "         a             b             ",
                "r1       longer-value  x             ",
                "         a             b             ",
                "row-two  1             wide-b-value  ",
            ]
        );
    }

    #[test]
    fn widths_cover_every_section_and_header() {
        let response = json!({
            "one": {"k": {"a": "1", "b": "22"}},
            "two": {"key-longer": {"a": "333", "b": "4"}}
        });
        let grid = Grid::from_response(&response).expect("payload is tabular");
        assert_eq!(grid.columns, vec!["a", "b"]);
        assert_eq!(
            grid.widths(),
            ColumnWidths {
                key: 10,
                columns: vec![3, 2],
            }
        );
    }

    #[test]
    fn column_names_set_minimum_width() {
        let response = json!({"s": {"k": {"bytes": 1}}});
        let grid = Grid::from_response(&response).expect("payload is tabular");
        assert_eq!(grid.widths().columns, vec![5]);
    }

    #[test]
    fn first_row_fixes_columns_and_missing_cells_print_nil() {
        let response = json!({
            "a": {"x": {"port": 1}},
            "b": {"y": {"port": 2, "extra": 3}, "z": {}}
        });
        let rendered = render_table(&response).expect("payload is tabular");
        assert_eq!(
            lines(&rendered),
            vec![
                "   port   ",
                "x  1      ",
                "   port   ",
                "y  2      ",
                "z  <nil>  ",
            ]
        );
    }

    #[test]
    fn empty_sections_print_nothing() {
        let response = json!({"empty": {}, "full": {"k": {"v": true}}});
        let rendered = render_table(&response).expect("payload is tabular");
        assert_eq!(lines(&rendered), vec!["   v     ", "k  true  "]);
        assert_eq!(render_table(&json!({})), Some(String::new()));
    }

    #[test]
    fn rows_print_in_sorted_order() {
        let response = json!({"s": {"b": {"n": 2}, "a": {"n": 1}}});
        let rendered = render_table(&response).expect("payload is tabular");
        assert_eq!(lines(&rendered), vec!["   n  ", "a  1  ", "b  2  "]);
    }

    #[test]
    fn shape_mismatches_decline() {
        assert_eq!(render_table(&json!([1, 2])), None);
        assert_eq!(render_table(&json!({"peers": 1})), None);
        assert_eq!(render_table(&json!({"peers": {"fc00::1": "up"}})), None);
    }
}
