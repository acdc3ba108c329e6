//! Calendar-year split of the watchlist rows

use crate::records::{CanonicalRecord, CanonicalTable};
use chrono::Datelike;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One calendar year's records, sorted by (Date, Symbol)
#[derive(Clone, Debug, PartialEq)]
pub struct YearPartition {
    pub year: i32,
    pub table: CanonicalTable,
}

impl YearPartition {
    /// Sheet name for this year, capped at the 31 characters a workbook allows
    pub fn sheet_name(&self) -> String {
        format!("Year_{}", self.year).chars().take(31).collect()
    }
}

/// Split `table` by the calendar year of each record's date.
///
/// Partitions come back in ascending year order and share the input's
/// column layout. Records without a symbol sort after those with one on
/// the same date.
pub fn partition_by_year(table: &CanonicalTable) -> Vec<YearPartition> {
    let mut years: BTreeMap<i32, Vec<CanonicalRecord>> = BTreeMap::new();
    for record in table.records() {
        years
            .entry(record.date.year())
            .or_default()
            .push(record.clone());
    }

    years
        .into_iter()
        .map(|(year, mut records)| {
            records.sort_by(by_date_then_symbol);
            YearPartition {
                year,
                table: table.with_records(records),
            }
        })
        .collect()
}

fn by_date_then_symbol(a: &CanonicalRecord, b: &CanonicalRecord) -> Ordering {
    a.date.cmp(&b.date).then_with(|| match (&a.symbol, &b.symbol) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CanonicalField;
    use chrono::NaiveDate;

    fn record(y: i32, m: u32, d: u32, symbol: Option<&str>) -> CanonicalRecord {
        let mut r = CanonicalRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap());
        r.symbol = symbol.map(str::to_string);
        r
    }

    fn table(records: Vec<CanonicalRecord>) -> CanonicalTable {
        CanonicalTable::new(
            vec![CanonicalField::Date, CanonicalField::Symbol],
            vec![],
            records,
        )
    }

    #[test]
    fn test_three_years_give_three_sorted_partitions() {
        let input = table(vec![
            record(2023, 6, 1, Some("TCS")),
            record(2021, 3, 2, Some("SBIN")),
            record(2022, 1, 4, Some("INFY")),
            record(2021, 3, 1, Some("TCS")),
            record(2023, 6, 1, Some("INFY")),
            record(2021, 3, 1, Some("ITC")),
        ]);

        let partitions = partition_by_year(&input);

        assert_eq!(partitions.len(), 3);
        assert_eq!(
            partitions.iter().map(|p| p.year).collect::<Vec<_>>(),
            vec![2021, 2022, 2023]
        );
        for partition in &partitions {
            let rows = partition.table.records();
            assert!(rows
                .windows(2)
                .all(|w| by_date_then_symbol(&w[0], &w[1]) != Ordering::Greater));
        }
        let first: Vec<_> = partitions[0]
            .table
            .records()
            .iter()
            .map(|r| (r.date.day(), r.symbol.clone().unwrap()))
            .collect();
        assert_eq!(
            first,
            vec![(1, "ITC".to_string()), (1, "TCS".to_string()), (2, "SBIN".to_string())]
        );
    }

    #[test]
    fn test_missing_symbol_sorts_last_within_date() {
        let partitions = partition_by_year(&table(vec![
            record(2024, 2, 1, None),
            record(2024, 2, 1, Some("LT")),
        ]));
        let symbols: Vec<_> = partitions[0].table.records().iter().map(|r| r.symbol.clone()).collect();
        assert_eq!(symbols, vec![Some("LT".to_string()), None]);
    }

    #[test]
    fn test_empty_table_has_no_partitions() {
        assert!(partition_by_year(&CanonicalTable::default()).is_empty());
    }

    #[test]
    fn test_sheet_name() {
        let partition = YearPartition {
            year: 2024,
            table: CanonicalTable::default(),
        };
        assert_eq!(partition.sheet_name(), "Year_2024");
    }
}
