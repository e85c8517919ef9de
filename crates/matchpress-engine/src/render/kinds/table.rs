//! Tables with optional header row and short-row padding.

use crate::inline::resolve_inline;

/// Renders a table. When `has_header` is set the first row becomes `<th>`
/// cells inside `<thead>`. Short rows are padded with empty cells to the
/// widest row so column counts stay visually consistent.
pub fn table(rows: &[Vec<String>], has_header: bool) -> String {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return "<table></table>".to_string();
    }

    let mut out = String::from("<table>");
    let mut body_rows = rows.iter();

    if has_header && let Some(header) = body_rows.next() {
        out.push_str("<thead><tr>");
        push_cells(&mut out, header, width, "th");
        out.push_str("</tr></thead>");
    }

    out.push_str("<tbody>");
    for row in body_rows {
        out.push_str("<tr>");
        push_cells(&mut out, row, width, "td");
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

fn push_cells(out: &mut String, row: &[String], width: usize, tag: &str) {
    for cell in row {
        out.push_str(&format!("<{tag}>{}</{tag}>", resolve_inline(cell)));
    }
    for _ in row.len()..width {
        out.push_str(&format!("<{tag}></{tag}>"));
    }
}
