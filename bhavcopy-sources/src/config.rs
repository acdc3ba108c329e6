//! Upstream endpoints and request settings

use bhavcopy_core::config::default_live_cutoff;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Root of the zipped legacy archive (`{base}/{YYYY}/{MON}/cm...bhav.csv.zip`)
    pub legacy_base_url: String,
    /// Directory holding `sec_bhavdata_full_{DDMMYYYY}.csv`
    pub live_base_url: String,
    /// First date served by the live files
    pub live_cutoff: NaiveDate,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub accept: String,
    pub referer: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            legacy_base_url: "https://archives.nseindia.com/content/historical/EQUITIES".to_string(),
            live_base_url: "https://nsearchives.nseindia.com/products/content".to_string(),
            live_cutoff: default_live_cutoff(),
            request_timeout: Duration::from_secs(20),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
            accept: "*/*".to_string(),
            referer: "https://www.nseindia.com".to_string(),
        }
    }
}
