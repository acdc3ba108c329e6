//! NSE Bhavcopy Core Library
//!
//! Source-agnostic half of the bhavcopy pipeline: raw tables from any
//! upstream layout are normalized onto one canonical schema, filtered by
//! a watchlist and aggregated per calendar year. No network and no file
//! I/O happen here.

pub mod aggregate;
pub mod config;
pub mod records;
pub mod schema;
pub mod table;
pub mod watchlist;

// Re-export main types for easy access
pub use aggregate::{partition_by_year, StatLine, StatValue, StatisticsSummary, YearPartition, YearStatistics};
pub use config::PipelineConfig;
pub use records::{CanonicalRecord, CanonicalTable, Cell, Column};
pub use schema::{CanonicalField, ColumnSynonymTable, SchemaNormalizer};
pub use table::{RawTable, RawValue, TableError, TableResult};
pub use watchlist::Watchlist;
