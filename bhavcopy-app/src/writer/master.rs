//! Merged master CSV over every downloaded day

use super::cell_text;
use anyhow::{Context, Result};
use bhavcopy_core::CanonicalTable;
use std::path::Path;

/// Write every collected record, unfiltered, as one CSV file
pub fn write_master_csv(table: &CanonicalTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(table.column_names())?;
    for record in table.records() {
        writer.write_record(table.row_cells(record).iter().map(cell_text))?;
    }
    writer.flush()?;
    Ok(())
}
