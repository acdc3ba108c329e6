//! Output artifacts: master CSV and per-year workbook

pub mod master;
pub mod workbook;

pub use master::write_master_csv;
pub use workbook::write_workbook;

use bhavcopy_core::Cell;

/// Text form of a cell for delimited output; missing cells are empty
pub fn cell_text(cell: &Cell<'_>) -> String {
    match cell {
        Cell::Date(date) => date.format("%Y-%m-%d").to_string(),
        Cell::Text(text) => text.to_string(),
        Cell::Number(value) => value.to_string(),
        Cell::Empty => String::new(),
    }
}
