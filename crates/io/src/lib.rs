// Output boundary: delimited export, table markup, print documents

pub mod delimited;
pub mod error;
pub mod markup;
pub mod print;

pub use delimited::{
    export_grid, export_to_delimited_text, validate_delimiter, DelimitedExport, ExportOptions, QuoteStyle,
};
pub use error::ExportError;
pub use markup::render_table_markup;
pub use print::{render_grid_print_document, render_print_document, PRINT_STYLESHEET};
