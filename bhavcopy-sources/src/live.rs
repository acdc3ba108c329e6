//! Live full bhavdata files (with delivery columns), used from the cutoff on

use crate::client::{build_client, fetch_bytes};
use crate::config::SourceConfig;
use crate::decode::decode_csv;
use crate::errors::SourceResult;
use crate::SourceAdapter;
use async_trait::async_trait;
use bhavcopy_core::RawTable;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::info;
use url::Url;

pub struct LiveBhavdataAdapter {
    client: Client,
    base_url: String,
}

impl LiveBhavdataAdapter {
    pub fn new(config: &SourceConfig) -> SourceResult<Self> {
        Ok(Self::with_client(build_client(config)?, config))
    }

    pub fn with_client(client: Client, config: &SourceConfig) -> Self {
        Self {
            client,
            base_url: config.live_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/sec_bhavdata_full_08072024.csv`
    pub fn url_for(&self, date: NaiveDate) -> SourceResult<Url> {
        let url = format!(
            "{}/sec_bhavdata_full_{}.csv",
            self.base_url,
            date.format("%d%m%Y")
        );
        Ok(Url::parse(&url)?)
    }
}

#[async_trait]
impl SourceAdapter for LiveBhavdataAdapter {
    fn name(&self) -> &str {
        "NEW(live)"
    }

    async fn fetch(&self, date: NaiveDate) -> SourceResult<Option<RawTable>> {
        let url = self.url_for(date)?;
        match fetch_bytes(&self.client, url.clone()).await? {
            Some(bytes) => decode_csv(bytes.as_slice()),
            None => {
                info!("404 (live bhavdata): {}", url);
                Ok(None)
            }
        }
    }
}
