//! Schema normalizer: raw source table -> canonical table

use super::field::FieldKind;
use super::plan::ColumnPlan;
use super::plan_cache::PlanCache;
use super::synonyms::ColumnSynonymTable;
use crate::records::{CanonicalRecord, CanonicalTable};
use crate::table::{RawTable, RawValue};
use chrono::NaiveDate;
use tracing::debug;

/// Maps arbitrary bhavcopy tables onto the canonical schema and units.
///
/// Stateless from the caller's point of view: each call depends only on
/// its own table and date. The plan cache only skips repeated column
/// resolution for header sets already seen.
pub struct SchemaNormalizer {
    synonyms: &'static ColumnSynonymTable,
    plans: PlanCache,
}

impl SchemaNormalizer {
    pub fn new() -> Self {
        Self::with_synonyms(ColumnSynonymTable::standard())
    }

    pub fn with_synonyms(synonyms: &'static ColumnSynonymTable) -> Self {
        Self {
            synonyms,
            plans: PlanCache::new(),
        }
    }

    /// Normalize one trading day's table.
    ///
    /// Returns `None` ("no data") for an absent or row-less table. Every
    /// record's `Date` is `trading_date`, whatever the source said.
    pub fn normalize(&self, table: Option<&RawTable>, trading_date: NaiveDate) -> Option<CanonicalTable> {
        let table = table.filter(|t| !t.is_empty())?;
        let plan = self.plans.get_or_resolve(table.headers(), self.synonyms);

        let records: Vec<CanonicalRecord> = table
            .rows()
            .iter()
            .map(|row| build_record(&plan, row, trading_date))
            .collect();

        debug!(
            "Normalized {} rows for {} ({} canonical fields, {} extra columns)",
            records.len(),
            trading_date,
            plan.output_fields().len(),
            plan.extras().len()
        );

        Some(CanonicalTable::new(
            plan.output_fields(),
            plan.extras().iter().map(|(_, label)| label.clone()).collect(),
            records,
        ))
    }

    pub fn plan_cache(&self) -> &PlanCache {
        &self.plans
    }
}

impl Default for SchemaNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn build_record(plan: &ColumnPlan, row: &[RawValue], trading_date: NaiveDate) -> CanonicalRecord {
    let mut record = CanonicalRecord::new(trading_date);

    for column in plan.resolved() {
        let raw = &row[column.source_index];
        match column.field.kind() {
            // The trading date always overrides whatever the source carried
            FieldKind::Date => {}
            FieldKind::Text => record.set_text(column.field, raw.as_text()),
            FieldKind::Numeric => record.set_numeric(
                column.field,
                raw.as_number().map(|v| v * column.scale.multiplier()),
            ),
        }
    }

    if plan.derives_vwap() {
        record.vwap = ratio(record.turnover, record.volume);
    }
    if plan.derives_deliverable_pct() {
        record.deliverable_pct = ratio(record.deliverable_volume, record.volume).map(|r| r * 100.0);
    }

    record.extras = plan
        .extras()
        .iter()
        .map(|(index, _)| row[*index].clone())
        .collect();

    record
}

/// Missing-safe division: missing operands or a zero denominator give `None`
fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d).filter(|v| v.is_finite()),
        _ => None,
    }
}
