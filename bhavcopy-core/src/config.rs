//! Pipeline configuration

use crate::watchlist::Watchlist;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// First trading day served by the live full-bhavdata files
pub fn default_live_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 8).unwrap_or(NaiveDate::MIN)
}

/// Run-level settings for a bhavcopy download
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub watchlist: Watchlist,
    /// Dates on or after this use the live source
    pub live_cutoff: NaiveDate,
    /// Pause after each weekday fetch
    pub pacing_delay: Duration,
    pub output_dir: PathBuf,
    pub write_master_csv: bool,
    pub master_prefix: String,
    pub workbook_prefix: String,
    pub top_symbols: usize,
    pub sample_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            watchlist: Watchlist::default(),
            live_cutoff: default_live_cutoff(),
            pacing_delay: Duration::from_millis(1200),
            output_dir: PathBuf::from("."),
            write_master_csv: true,
            master_prefix: "NSE_Bhavcopy_merged".to_string(),
            workbook_prefix: "NSE_Selected_Stocks".to_string(),
            top_symbols: 10,
            sample_rows: 10,
        }
    }
}

impl PipelineConfig {
    pub fn master_path(&self, start: NaiveDate, end: NaiveDate) -> PathBuf {
        range_file(&self.output_dir, &self.master_prefix, start, end, "csv")
    }

    pub fn workbook_path(&self, start: NaiveDate, end: NaiveDate) -> PathBuf {
        range_file(&self.output_dir, &self.workbook_prefix, start, end, "xlsx")
    }
}

fn range_file(dir: &Path, prefix: &str, start: NaiveDate, end: NaiveDate, ext: &str) -> PathBuf {
    dir.join(format!("{}_{}_to_{}.{}", prefix, start, end, ext))
}
