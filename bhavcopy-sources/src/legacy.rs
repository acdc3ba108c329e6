//! Legacy zipped bhavcopy archive, used for dates before the live cutoff

use crate::client::{build_client, fetch_bytes};
use crate::config::SourceConfig;
use crate::decode::decode_zipped_csv;
use crate::errors::SourceResult;
use crate::SourceAdapter;
use async_trait::async_trait;
use bhavcopy_core::RawTable;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::info;
use url::Url;

pub struct LegacyArchiveAdapter {
    client: Client,
    base_url: String,
}

impl LegacyArchiveAdapter {
    pub fn new(config: &SourceConfig) -> SourceResult<Self> {
        Ok(Self::with_client(build_client(config)?, config))
    }

    pub fn with_client(client: Client, config: &SourceConfig) -> Self {
        Self {
            client,
            base_url: config.legacy_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/2023/JAN/cm02JAN2023bhav.csv.zip`
    pub fn url_for(&self, date: NaiveDate) -> SourceResult<Url> {
        let month = date.format("%b").to_string().to_uppercase();
        let url = format!(
            "{}/{}/{}/cm{}{}{}bhav.csv.zip",
            self.base_url,
            date.format("%Y"),
            month,
            date.format("%d"),
            month,
            date.format("%Y"),
        );
        Ok(Url::parse(&url)?)
    }
}

#[async_trait]
impl SourceAdapter for LegacyArchiveAdapter {
    fn name(&self) -> &str {
        "OLD(archive)"
    }

    async fn fetch(&self, date: NaiveDate) -> SourceResult<Option<RawTable>> {
        let url = self.url_for(date)?;
        match fetch_bytes(&self.client, url.clone()).await? {
            Some(bytes) => decode_zipped_csv(&bytes),
            None => {
                info!("404 (old archive): {}", url);
                Ok(None)
            }
        }
    }
}
