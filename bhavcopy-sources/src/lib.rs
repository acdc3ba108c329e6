//! NSE Bhavcopy Sources
//!
//! Fetches one trading day's bhavcopy from the exchange and hands it to
//! the core as a raw table. Dates before the live cutoff come from the
//! zipped legacy archive, later dates from the full bhavdata CSV files.

use async_trait::async_trait;
use bhavcopy_core::RawTable;
use chrono::NaiveDate;

pub mod client;
pub mod config;
pub mod decode;
pub mod errors;
pub mod legacy;
pub mod live;
pub mod router;

pub use config::SourceConfig;
pub use errors::{ErrorKind, SourceError, SourceResult};
pub use legacy::LegacyArchiveAdapter;
pub use live::LiveBhavdataAdapter;
pub use router::{is_weekend, BhavcopySource};

/// One upstream bhavcopy source.
///
/// `Ok(None)` means nothing is published for the date (404, empty file).
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch(&self, date: NaiveDate) -> SourceResult<Option<RawTable>>;
}
