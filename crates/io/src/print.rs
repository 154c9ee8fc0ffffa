// Printable HTML document around a table

use rostergrid_engine::Grid;

use crate::markup::{escape_html, render_table_markup};

/// Stylesheet used when no override is configured.
pub const PRINT_STYLESHEET: &str = "\
body { font-family: Arial, sans-serif; }
table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f2f2f2; }
@media print {
    .no-print { display: none; }
}";

/// Wrap table markup in a standalone document for printing.
///
/// `table_markup` is embedded verbatim; `title` is escaped and shown as the
/// page heading. `stylesheet` replaces `PRINT_STYLESHEET` when given.
pub fn render_print_document(table_markup: &str, title: &str, stylesheet: Option<&str>) -> String {
    let style = stylesheet.unwrap_or(PRINT_STYLESHEET);
    format!(
        "<html>\n<head>\n<title>Print</title>\n<style>\n{style}\n</style>\n</head>\n<body>\n<h2>{}</h2>\n{table_markup}\n</body>\n</html>\n",
        escape_html(title)
    )
}

/// Print document for a grid in its current sort/filter state.
pub fn render_grid_print_document(grid: &Grid, title: &str, stylesheet: Option<&str>) -> String {
    render_print_document(&render_table_markup(grid), title, stylesheet)
}
