//! Year-partitioned aggregation
//!
//! Groups filtered records by calendar year for the per-year workbook
//! sheets and computes the summary written to the statistics sheet.

pub mod partition;
pub mod statistics;

pub use partition::{partition_by_year, YearPartition};
pub use statistics::{StatLine, StatValue, StatisticsSummary, YearStatistics};
