// HTML table markup for a grid

use rostergrid_engine::Grid;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a grid as `<table>` markup in its current view state.
///
/// The first head row carries the sort marker class on the active column.
/// Body rows come in view order; rows hidden by the filter are kept with
/// `style="display: none"`.
pub fn render_table_markup(grid: &Grid) -> String {
    let table = grid.table();
    let sort = grid.sort_state();
    let mut out = String::new();

    out.push_str(&format!("<table id=\"{}\" class=\"table sortable\">\n", escape_html(table.id())));

    if !table.head().is_empty() {
        out.push_str("<thead>\n");
        for (i, row) in table.head().iter().enumerate() {
            out.push_str("<tr>");
            for (col, cell) in row.cells().iter().enumerate() {
                match sort.marker(col).filter(|_| i == 0) {
                    Some(dir) => out.push_str(&format!("<th class=\"{}\">", dir.marker_class())),
                    None => out.push_str("<th>"),
                }
                out.push_str(&escape_html(cell.text()));
                out.push_str("</th>");
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</thead>\n");
    }

    out.push_str("<tbody>\n");
    for (row, visible) in grid.body_in_view_order() {
        out.push_str(if visible { "<tr>" } else { "<tr style=\"display: none\">" });
        for cell in row.cells() {
            out.push_str("<td>");
            out.push_str(&escape_html(cell.text()));
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>");
    out
}
