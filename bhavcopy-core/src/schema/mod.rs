//! Schema normalization
//!
//! Turns a raw bhavcopy table with source-specific labels and units into
//! the canonical schema: synonym-based column resolution (exact, then
//! fuzzy), unit scaling decided from the original label, and missing-safe
//! derivation of VWAP and Deliverable %.

pub mod field;
pub mod normalizer;
pub mod plan;
pub mod plan_cache;
pub mod synonyms;

pub use field::{CanonicalField, FieldKind};
pub use normalizer::SchemaNormalizer;
pub use plan::{ColumnPlan, MatchKind, ResolvedColumn, UnitScale};
pub use plan_cache::PlanCache;
pub use synonyms::{normalize_label, ColumnSynonymTable};
