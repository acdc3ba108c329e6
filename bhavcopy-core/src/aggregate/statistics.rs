//! Summary statistics over the watchlist rows

use crate::records::CanonicalTable;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Per-year counts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearStatistics {
    pub year: i32,
    pub records: usize,
    pub trading_days: usize,
    pub symbols: usize,
}

/// Summary of a filtered table
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub total_records: usize,
    pub unique_symbols: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub trading_days: usize,
    pub years: Vec<YearStatistics>,
    /// Most frequent symbols, count descending, ties in first-appearance order
    pub top_symbols: Vec<(String, usize)>,
}

/// Value cell of a statistics line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatValue {
    Count(usize),
    Text(String),
    Empty,
}

/// One `Statistic` / `Value` row of the statistics sheet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatLine {
    pub label: String,
    pub value: StatValue,
}

impl StatLine {
    fn new(label: impl Into<String>, value: StatValue) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    fn blank() -> Self {
        Self::new("", StatValue::Empty)
    }
}

impl StatisticsSummary {
    pub fn from_table(table: &CanonicalTable, top_n: usize) -> Self {
        let records = table.records();

        let days: BTreeSet<NaiveDate> = records.iter().map(|r| r.date).collect();
        let symbols: HashSet<&str> = records.iter().filter_map(|r| r.symbol.as_deref()).collect();

        let mut per_year: BTreeMap<i32, (usize, HashSet<NaiveDate>, HashSet<&str>)> = BTreeMap::new();
        for record in records {
            let entry = per_year.entry(record.date.year()).or_default();
            entry.0 += 1;
            entry.1.insert(record.date);
            if let Some(symbol) = record.symbol.as_deref() {
                entry.2.insert(symbol);
            }
        }
        let years = per_year
            .into_iter()
            .map(|(year, (records, days, symbols))| YearStatistics {
                year,
                records,
                trading_days: days.len(),
                symbols: symbols.len(),
            })
            .collect();

        Self {
            total_records: records.len(),
            unique_symbols: symbols.len(),
            first_date: days.first().copied(),
            last_date: days.last().copied(),
            trading_days: days.len(),
            years,
            top_symbols: symbol_frequencies(table, top_n),
        }
    }

    /// `"first to last"`, empty when there are no records
    pub fn date_range(&self) -> String {
        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => format!("{} to {}", first, last),
            _ => String::new(),
        }
    }

    /// Statistics sheet rows, in sheet order
    pub fn lines(&self) -> Vec<StatLine> {
        let mut lines = vec![
            StatLine::new("Total Records", StatValue::Count(self.total_records)),
            StatLine::new("Unique Stocks", StatValue::Count(self.unique_symbols)),
            StatLine::new("Date Range", StatValue::Text(self.date_range())),
            StatLine::new("Total Trading Days", StatValue::Count(self.trading_days)),
            StatLine::blank(),
        ];

        for year in &self.years {
            lines.push(StatLine::new(
                format!("Year {} - Records", year.year),
                StatValue::Count(year.records),
            ));
            lines.push(StatLine::new(
                format!("Year {} - Trading Days", year.year),
                StatValue::Count(year.trading_days),
            ));
            lines.push(StatLine::new(
                format!("Year {} - Stocks", year.year),
                StatValue::Count(year.symbols),
            ));
        }

        lines.push(StatLine::blank());
        lines.push(StatLine::new("Records per Stock:", StatValue::Empty));
        for (symbol, count) in &self.top_symbols {
            lines.push(StatLine::new(format!("  {}", symbol), StatValue::Count(*count)));
        }

        lines
    }
}

fn symbol_frequencies(table: &CanonicalTable, top_n: usize) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for symbol in table.records().iter().filter_map(|r| r.symbol.as_deref()) {
        match index.get(symbol) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(symbol, counts.len());
                counts.push((symbol.to_string(), 1));
            }
        }
    }

    // Stable: equal counts keep first-appearance order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(top_n);
    counts
}
