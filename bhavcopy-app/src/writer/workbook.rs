//! Year-partitioned watchlist workbook

use anyhow::{Context, Result};
use bhavcopy_core::{Cell, StatValue, StatisticsSummary, YearPartition};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tracing::info;

pub const STATISTICS_SHEET: &str = "Statistics";

/// One sheet per year plus the statistics sheet
pub fn write_workbook(
    partitions: &[YearPartition],
    statistics: &StatisticsSummary,
    path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    for partition in partitions {
        let name = partition.sheet_name();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&name)?;
        write_partition(sheet, partition, &header)?;
        info!(
            "✅ Saved {} rows for year {} in sheet '{}'",
            partition.table.len(),
            partition.year,
            name
        );
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(STATISTICS_SHEET)?;
    write_statistics(sheet, statistics, &header)?;
    info!("✅ Created statistics sheet");

    workbook
        .save(path)
        .with_context(|| format!("Failed to save workbook {}", path.display()))?;
    Ok(())
}

fn write_partition(sheet: &mut Worksheet, partition: &YearPartition, header: &Format) -> Result<()> {
    let table = &partition.table;
    for (col, name) in table.column_names().iter().enumerate() {
        sheet.write_string_with_format(0, u16::try_from(col)?, name, header)?;
    }

    for (i, record) in table.records().iter().enumerate() {
        let row = u32::try_from(i + 1)?;
        for (col, cell) in table.row_cells(record).iter().enumerate() {
            let col = u16::try_from(col)?;
            match cell {
                Cell::Date(date) => {
                    sheet.write_string(row, col, date.format("%Y-%m-%d").to_string())?;
                }
                Cell::Text(text) => {
                    sheet.write_string(row, col, *text)?;
                }
                Cell::Number(value) => {
                    sheet.write_number(row, col, *value)?;
                }
                Cell::Empty => {}
            }
        }
    }
    Ok(())
}

fn write_statistics(sheet: &mut Worksheet, statistics: &StatisticsSummary, header: &Format) -> Result<()> {
    sheet.write_string_with_format(0, 0, "Statistic", header)?;
    sheet.write_string_with_format(0, 1, "Value", header)?;

    for (i, line) in statistics.lines().iter().enumerate() {
        let row = u32::try_from(i + 1)?;
        sheet.write_string(row, 0, &line.label)?;
        match &line.value {
            StatValue::Count(count) => {
                sheet.write_number(row, 1, *count as f64)?;
            }
            StatValue::Text(text) => {
                sheet.write_string(row, 1, text)?;
            }
            StatValue::Empty => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhavcopy_core::{partition_by_year, CanonicalField, CanonicalRecord, CanonicalTable};
    use chrono::NaiveDate;

    fn table() -> CanonicalTable {
        let records = [(2022, "TCS"), (2023, "INFY"), (2023, "TCS")]
            .iter()
            .map(|(year, symbol)| {
                let mut r = CanonicalRecord::new(NaiveDate::from_ymd_opt(*year, 6, 1).unwrap());
                r.symbol = Some(symbol.to_string());
                r.close = Some(100.5);
                r
            })
            .collect();
        CanonicalTable::new(
            vec![CanonicalField::Date, CanonicalField::Symbol, CanonicalField::Close],
            vec![],
            records,
        )
    }

    #[test]
    fn test_workbook_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchlist.xlsx");
        let table = table();
        let partitions = partition_by_year(&table);
        let statistics = StatisticsSummary::from_table(&table, 10);

        write_workbook(&partitions, &statistics, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_workbook_without_years_still_has_statistics() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        write_workbook(&[], &StatisticsSummary::default(), &path).unwrap();
        assert!(path.exists());
    }
}
