//! Canonical records and tables

use crate::schema::{CanonicalField, FieldKind};
use crate::table::RawValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// One row in the unified schema.
///
/// Numeric fields are `None` when the source did not carry them or the
/// cell did not parse. `extras` lines up with the owning table's
/// `extra_columns`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub date: NaiveDate,
    pub symbol: Option<String>,
    pub series: Option<String>,
    pub prev_close: Option<f64>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub last: Option<f64>,
    pub close: Option<f64>,
    pub vwap: Option<f64>,
    pub volume: Option<f64>,
    pub turnover: Option<f64>,
    pub trades: Option<f64>,
    pub deliverable_volume: Option<f64>,
    pub deliverable_pct: Option<f64>,
    pub isin: Option<String>,
    pub extras: Vec<RawValue>,
}

/// A borrowed output cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell<'a> {
    Date(NaiveDate),
    Text(&'a str),
    Number(f64),
    Empty,
}

impl<'a> Cell<'a> {
    fn from_raw(value: &'a RawValue) -> Self {
        match value {
            RawValue::Text(s) => Cell::Text(s),
            RawValue::Number(n) if n.is_finite() => Cell::Number(*n),
            _ => Cell::Empty,
        }
    }
}

impl CanonicalRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            symbol: None,
            series: None,
            prev_close: None,
            open: None,
            high: None,
            low: None,
            last: None,
            close: None,
            vwap: None,
            volume: None,
            turnover: None,
            trades: None,
            deliverable_volume: None,
            deliverable_pct: None,
            isin: None,
            extras: Vec::new(),
        }
    }

    pub fn numeric(&self, field: CanonicalField) -> Option<f64> {
        match field {
            CanonicalField::PrevClose => self.prev_close,
            CanonicalField::Open => self.open,
            CanonicalField::High => self.high,
            CanonicalField::Low => self.low,
            CanonicalField::Last => self.last,
            CanonicalField::Close => self.close,
            CanonicalField::Vwap => self.vwap,
            CanonicalField::Volume => self.volume,
            CanonicalField::Turnover => self.turnover,
            CanonicalField::Trades => self.trades,
            CanonicalField::DeliverableVolume => self.deliverable_volume,
            CanonicalField::DeliverablePct => self.deliverable_pct,
            _ => None,
        }
    }

    pub fn text(&self, field: CanonicalField) -> Option<&str> {
        match field {
            CanonicalField::Symbol => self.symbol.as_deref(),
            CanonicalField::Series => self.series.as_deref(),
            CanonicalField::Isin => self.isin.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn set_numeric(&mut self, field: CanonicalField, value: Option<f64>) {
        let slot = match field {
            CanonicalField::PrevClose => &mut self.prev_close,
            CanonicalField::Open => &mut self.open,
            CanonicalField::High => &mut self.high,
            CanonicalField::Low => &mut self.low,
            CanonicalField::Last => &mut self.last,
            CanonicalField::Close => &mut self.close,
            CanonicalField::Vwap => &mut self.vwap,
            CanonicalField::Volume => &mut self.volume,
            CanonicalField::Turnover => &mut self.turnover,
            CanonicalField::Trades => &mut self.trades,
            CanonicalField::DeliverableVolume => &mut self.deliverable_volume,
            CanonicalField::DeliverablePct => &mut self.deliverable_pct,
            _ => return,
        };
        *slot = value;
    }

    pub(crate) fn set_text(&mut self, field: CanonicalField, value: Option<String>) {
        match field {
            CanonicalField::Symbol => self.symbol = value,
            CanonicalField::Series => self.series = value,
            CanonicalField::Isin => self.isin = value,
            _ => {}
        }
    }

    pub fn cell(&self, field: CanonicalField) -> Cell<'_> {
        match field.kind() {
            FieldKind::Date => Cell::Date(self.date),
            FieldKind::Text => self.text(field).map(Cell::Text).unwrap_or(Cell::Empty),
            FieldKind::Numeric => self.numeric(field).map(Cell::Number).unwrap_or(Cell::Empty),
        }
    }
}

/// A column of a canonical table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Column {
    Canonical(CanonicalField),
    Extra(String),
}

impl Column {
    pub fn name(&self) -> &str {
        match self {
            Column::Canonical(field) => field.name(),
            Column::Extra(label) => label,
        }
    }
}

/// Canonical records sharing one column layout: present canonical fields
/// in canonical order, then unrecognized source columns in source order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTable {
    fields: Vec<CanonicalField>,
    extra_columns: Vec<String>,
    records: Vec<CanonicalRecord>,
}

impl CanonicalTable {
    pub fn new(
        mut fields: Vec<CanonicalField>,
        extra_columns: Vec<String>,
        records: Vec<CanonicalRecord>,
    ) -> Self {
        fields.sort();
        fields.dedup();
        Self {
            fields,
            extra_columns,
            records,
        }
    }

    /// Concatenate tables of differing layouts.
    ///
    /// Canonical fields are the union in canonical order; extra columns are
    /// the union in first-seen order. A label repeated within one table
    /// keeps one master column per occurrence: the Nth duplicate maps to the
    /// Nth column of that label. A record gets an empty cell for any column
    /// its own table lacked.
    pub fn concat(tables: impl IntoIterator<Item = CanonicalTable>) -> Self {
        let tables: Vec<CanonicalTable> = tables.into_iter().collect();

        let fields: BTreeSet<CanonicalField> = tables
            .iter()
            .flat_map(|t| t.fields.iter().copied())
            .collect();

        let mut extra_columns: Vec<String> = Vec::new();
        let mut slots: HashMap<String, Vec<usize>> = HashMap::new();
        let positions: Vec<Vec<usize>> = tables
            .iter()
            .map(|table| {
                let mut seen: HashMap<&str, usize> = HashMap::new();
                table
                    .extra_columns
                    .iter()
                    .map(|label| {
                        let occurrence = seen.entry(label.as_str()).or_insert(0);
                        let label_slots = slots.entry(label.clone()).or_default();
                        if label_slots.len() == *occurrence {
                            label_slots.push(extra_columns.len());
                            extra_columns.push(label.clone());
                        }
                        let position = label_slots[*occurrence];
                        *occurrence += 1;
                        position
                    })
                    .collect()
            })
            .collect();

        let mut records = Vec::with_capacity(tables.iter().map(|t| t.len()).sum());
        for (table, positions) in tables.into_iter().zip(positions) {
            for mut record in table.records {
                let mut extras = vec![RawValue::Null; extra_columns.len()];
                for (value, &position) in record.extras.drain(..).zip(&positions) {
                    extras[position] = value;
                }
                record.extras = extras;
                records.push(record);
            }
        }

        Self {
            fields: fields.into_iter().collect(),
            extra_columns,
            records,
        }
    }

    pub fn fields(&self) -> &[CanonicalField] {
        &self.fields
    }

    pub fn has_field(&self, field: CanonicalField) -> bool {
        self.fields.contains(&field)
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    /// Output column order
    pub fn columns(&self) -> Vec<Column> {
        self.fields
            .iter()
            .copied()
            .map(Column::Canonical)
            .chain(self.extra_columns.iter().cloned().map(Column::Extra))
            .collect()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns().iter().map(|c| c.name().to_string()).collect()
    }

    /// One record's cells in output column order
    pub fn row_cells<'a>(&self, record: &'a CanonicalRecord) -> Vec<Cell<'a>> {
        let mut cells: Vec<Cell<'a>> = self.fields.iter().map(|f| record.cell(*f)).collect();
        cells.extend(
            (0..self.extra_columns.len())
                .map(|i| record.extras.get(i).map(Cell::from_raw).unwrap_or(Cell::Empty)),
        );
        cells
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    /// Same layout, different rows
    pub fn with_records(&self, records: Vec<CanonicalRecord>) -> Self {
        Self {
            fields: self.fields.clone(),
            extra_columns: self.extra_columns.clone(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
