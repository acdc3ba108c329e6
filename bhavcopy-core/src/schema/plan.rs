//! Column resolution: which raw column becomes which canonical field
//!
//! Resolution and unit classification happen in the same step, while the
//! original label is still at hand; once a column has been renamed its
//! unit hint is gone.

use super::field::CanonicalField;
use super::synonyms::{normalize_label, ColumnSynonymTable};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scale a raw numeric column was published in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitScale {
    Unit,
    Thousands,
    Lakhs,
    Crores,
}

impl UnitScale {
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Unit => 1.0,
            Self::Thousands => 1_000.0,
            Self::Lakhs => 1e5,
            Self::Crores => 1e7,
        }
    }

    /// Volume published in thousands carries `000` or `thousand` in its label
    pub fn for_volume(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("000") || label.contains("thousand") {
            Self::Thousands
        } else {
            Self::Unit
        }
    }

    /// Turnover published in lakhs or crores says so in its label
    pub fn for_turnover(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("lakh") || label.contains("lac") {
            Self::Lakhs
        } else if label.contains("cr") {
            Self::Crores
        } else {
            Self::Unit
        }
    }

    fn for_field(field: CanonicalField, label: &str) -> Self {
        match field {
            CanonicalField::Volume => Self::for_volume(label),
            CanonicalField::Turnover => Self::for_turnover(label),
            _ => Self::Unit,
        }
    }
}

/// How a column was matched to its field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    Exact,
    Fuzzy,
}

/// A raw column claimed by a canonical field
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedColumn {
    pub field: CanonicalField,
    pub source_index: usize,
    pub source_label: String,
    pub scale: UnitScale,
    pub matched_by: MatchKind,
}

/// Rename and unit plan for one header set
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnPlan {
    resolved: Vec<ResolvedColumn>,
    extras: Vec<(usize, String)>,
    derive_vwap: bool,
    derive_deliverable_pct: bool,
}

impl ColumnPlan {
    /// Resolve every canonical field against `headers`.
    ///
    /// All fields take their exact pass first, in table order; a column
    /// claimed there is off limits to every other field. Fields left
    /// unresolved then take their fuzzy (substring) pass over the
    /// remaining columns, again in table order, first field wins.
    ///
    /// `Date` is exact-only: its values are replaced by the trading date,
    /// so a fuzzy claim would discard unrelated columns such as
    /// `LAST_UPDATE_FLAG`. Those stay extras instead.
    pub fn resolve(headers: &[String], synonyms: &ColumnSynonymTable) -> Self {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_label(h)).collect();
        let mut claimed = vec![false; headers.len()];
        let mut matches: Vec<(CanonicalField, usize, MatchKind)> = Vec::new();

        for (field, aliases) in synonyms.entries() {
            let hit = aliases.iter().find_map(|alias| {
                normalized
                    .iter()
                    .enumerate()
                    .find(|(i, label)| !claimed[*i] && label.as_str() == *alias)
                    .map(|(i, _)| i)
            });
            if let Some(index) = hit {
                claimed[index] = true;
                matches.push((field, index, MatchKind::Exact));
            }
        }

        for (field, aliases) in synonyms.entries() {
            if field == CanonicalField::Date || matches.iter().any(|(f, _, _)| *f == field) {
                continue;
            }
            let hit = normalized.iter().enumerate().find(|(i, label)| {
                !claimed[*i] && aliases.iter().any(|alias| label.contains(alias))
            });
            if let Some((index, _)) = hit {
                claimed[index] = true;
                matches.push((field, index, MatchKind::Fuzzy));
            }
        }

        matches.sort_by_key(|(field, _, _)| *field);

        let resolved: Vec<ResolvedColumn> = matches
            .into_iter()
            .map(|(field, index, matched_by)| {
                let source_label = headers[index].clone();
                let scale = UnitScale::for_field(field, &source_label);
                debug!(
                    "Column '{}' -> {} ({:?}, scale {:?})",
                    source_label, field, matched_by, scale
                );
                ResolvedColumn {
                    field,
                    source_index: index,
                    source_label,
                    scale,
                    matched_by,
                }
            })
            .collect();

        let extras = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| !claimed[*i])
            .map(|(i, label)| (i, label.clone()))
            .collect();

        let has = |field: CanonicalField| resolved.iter().any(|c| c.field == field);
        let derive_vwap = !has(CanonicalField::Vwap)
            && has(CanonicalField::Turnover)
            && has(CanonicalField::Volume);
        let derive_deliverable_pct = !has(CanonicalField::DeliverablePct)
            && has(CanonicalField::DeliverableVolume)
            && has(CanonicalField::Volume);

        Self {
            resolved,
            extras,
            derive_vwap,
            derive_deliverable_pct,
        }
    }

    /// Resolved columns in canonical field order
    pub fn resolved(&self) -> &[ResolvedColumn] {
        &self.resolved
    }

    pub fn column_for(&self, field: CanonicalField) -> Option<&ResolvedColumn> {
        self.resolved.iter().find(|c| c.field == field)
    }

    /// Unrecognized columns as (raw index, original label), in header order
    pub fn extras(&self) -> &[(usize, String)] {
        &self.extras
    }

    pub fn derives_vwap(&self) -> bool {
        self.derive_vwap
    }

    pub fn derives_deliverable_pct(&self) -> bool {
        self.derive_deliverable_pct
    }

    /// Canonical fields present in the output, in canonical order.
    ///
    /// `Date` is always present: it is filled from the trading date when
    /// no raw date column resolved.
    pub fn output_fields(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .iter()
            .copied()
            .filter(|field| match field {
                CanonicalField::Date => true,
                CanonicalField::Vwap if self.derive_vwap => true,
                CanonicalField::DeliverablePct if self.derive_deliverable_pct => true,
                _ => self.column_for(*field).is_some(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(headers: &[&str]) -> ColumnPlan {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        ColumnPlan::resolve(&headers, ColumnSynonymTable::standard())
    }

    fn label_of(plan: &ColumnPlan, field: CanonicalField) -> Option<&str> {
        plan.column_for(field).map(|c| c.source_label.as_str())
    }

    #[test]
    fn test_volume_aliases_in_any_spelling() {
        for header in ["TOT_TRD_QTY", "TotalTradedQuantity", "Tot Trd Qty", " TTL_TRD_QNTY"] {
            let plan = plan(&["SYMBOL", header]);
            let column = plan.column_for(CanonicalField::Volume).unwrap();
            assert_eq!(column.source_label, header);
            assert_eq!(column.matched_by, MatchKind::Exact);
        }
    }

    #[test]
    fn test_legacy_archive_headers() {
        let plan = plan(&[
            "SYMBOL", "SERIES", "OPEN", "HIGH", "LOW", "CLOSE", "LAST", "PREVCLOSE",
            "TOTTRDQTY", "TOTTRDVAL", "TIMESTAMP", "TOTALTRADES", "ISIN",
        ]);

        assert_eq!(label_of(&plan, CanonicalField::Date), Some("TIMESTAMP"));
        assert_eq!(label_of(&plan, CanonicalField::Close), Some("CLOSE"));
        assert_eq!(label_of(&plan, CanonicalField::PrevClose), Some("PREVCLOSE"));
        assert_eq!(label_of(&plan, CanonicalField::Volume), Some("TOTTRDQTY"));
        assert_eq!(label_of(&plan, CanonicalField::Turnover), Some("TOTTRDVAL"));
        assert_eq!(label_of(&plan, CanonicalField::Trades), Some("TOTALTRADES"));
        assert!(plan.extras().is_empty());
        assert!(plan.derives_vwap());
        assert!(!plan.derives_deliverable_pct());
    }

    #[test]
    fn test_live_bhavdata_headers() {
        let plan = plan(&[
            "SYMBOL", " SERIES", " DATE1", " PREV_CLOSE", " OPEN_PRICE", " HIGH_PRICE",
            " LOW_PRICE", " LAST_PRICE", " CLOSE_PRICE", " AVG_PRICE", " TTL_TRD_QNTY",
            " TURNOVER_LACS", " NO_OF_TRADES", " DELIV_QTY", " DELIV_PER",
        ]);

        assert_eq!(label_of(&plan, CanonicalField::Date), Some(" DATE1"));
        assert_eq!(label_of(&plan, CanonicalField::Vwap), Some(" AVG_PRICE"));
        assert_eq!(label_of(&plan, CanonicalField::DeliverablePct), Some(" DELIV_PER"));
        assert_eq!(
            plan.column_for(CanonicalField::Turnover).unwrap().scale,
            UnitScale::Lakhs
        );
        assert_eq!(
            plan.column_for(CanonicalField::Date).unwrap().matched_by,
            MatchKind::Exact
        );
        assert!(!plan.derives_vwap());
        assert!(!plan.derives_deliverable_pct());
        assert_eq!(plan.output_fields(), CanonicalField::ALL[..15].to_vec());
    }

    #[test]
    fn test_exact_claims_beat_fuzzy_across_fields() {
        // "closepx" is only a fuzzy Close candidate; "Prev_Close" must stay
        // with Prev Close even though it also contains "close".
        let plan = plan(&["Prev_Close", "Close Px"]);
        assert_eq!(label_of(&plan, CanonicalField::PrevClose), Some("Prev_Close"));
        assert_eq!(label_of(&plan, CanonicalField::Close), Some("Close Px"));
    }

    #[test]
    fn test_fuzzy_ambiguity_goes_to_first_field_iterated() {
        // Known ambiguity: a lone label holding both "prevclose" and "close"
        // fuzzily matches two fields; Prev Close is iterated first.
        let plan = plan(&["PrevClosePx"]);
        assert_eq!(label_of(&plan, CanonicalField::PrevClose), Some("PrevClosePx"));
        assert_eq!(plan.column_for(CanonicalField::Close), None);
    }

    #[test]
    fn test_date_never_claims_by_substring() {
        let plan = plan(&["SYMBOL", "CLOSE", "LAST", "LAST_UPDATE_FLAG", "Validated"]);
        assert_eq!(plan.column_for(CanonicalField::Date), None);
        assert_eq!(
            plan.extras(),
            &[(3, "LAST_UPDATE_FLAG".to_string()), (4, "Validated".to_string())]
        );
        // Date is still emitted, filled from the trading date
        assert_eq!(plan.output_fields()[0], CanonicalField::Date);
    }

    #[test]
    fn test_first_alias_wins_exact_ties() {
        let plan = plan(&["TOTTRDQTY", "Volume"]);
        assert_eq!(label_of(&plan, CanonicalField::Volume), Some("Volume"));
        assert_eq!(plan.extras(), &[(0, "TOTTRDQTY".to_string())]);
    }

    #[test]
    fn test_unknown_columns_kept_in_order() {
        let plan = plan(&["MKT", "SYMBOL", "CORP_IND", "CLOSE", "SECURITY"]);
        assert_eq!(
            plan.extras(),
            &[
                (0, "MKT".to_string()),
                (2, "CORP_IND".to_string()),
                (4, "SECURITY".to_string()),
            ]
        );
    }

    #[test]
    fn test_unit_scale_from_original_label() {
        assert_eq!(UnitScale::for_volume("Volume (in 000s)"), UnitScale::Thousands);
        assert_eq!(UnitScale::for_volume("Qty in Thousands"), UnitScale::Thousands);
        assert_eq!(UnitScale::for_volume("TOTTRDQTY"), UnitScale::Unit);
        assert_eq!(UnitScale::for_turnover("TURNOVER_LACS"), UnitScale::Lakhs);
        assert_eq!(UnitScale::for_turnover("Turnover (in Lakhs)"), UnitScale::Lakhs);
        assert_eq!(UnitScale::for_turnover("Turnover Cr"), UnitScale::Crores);
        assert_eq!(UnitScale::for_turnover("TurnoverInCrores"), UnitScale::Crores);
        assert_eq!(UnitScale::for_turnover("TOTTRDVAL"), UnitScale::Unit);
    }

    #[test]
    fn test_canonical_labels_carry_no_unit_hint() {
        let plan = plan(&["Symbol", "Volume", "Turnover"]);
        assert_eq!(plan.column_for(CanonicalField::Volume).unwrap().scale, UnitScale::Unit);
        assert_eq!(plan.column_for(CanonicalField::Turnover).unwrap().scale, UnitScale::Unit);
    }

    #[test]
    fn test_deliverable_pct_derived_only_when_absent() {
        let with_pct = plan(&["Volume", "Deliverable Volume", "% Deliverable"]);
        assert!(!with_pct.derives_deliverable_pct());

        let without_pct = plan(&["Volume", "Deliverable Volume"]);
        assert!(without_pct.derives_deliverable_pct());
        assert!(without_pct.output_fields().contains(&CanonicalField::DeliverablePct));
    }
}
