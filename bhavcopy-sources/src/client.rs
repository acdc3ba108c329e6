//! Shared HTTP client

use crate::config::SourceConfig;
use crate::errors::{SourceError, SourceResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

/// Client carrying the browser-like headers the exchange archives expect
pub fn build_client(config: &SourceConfig) -> SourceResult<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
    headers.insert(ACCEPT, HeaderValue::from_str(&config.accept)?);
    headers.insert(REFERER, HeaderValue::from_str(&config.referer)?);

    Ok(Client::builder()
        .default_headers(headers)
        .timeout(config.request_timeout)
        .build()?)
}

/// GET `url`; a 404 means nothing was published and comes back as `None`
pub async fn fetch_bytes(client: &Client, url: Url) -> SourceResult<Option<Vec<u8>>> {
    debug!("GET {}", url);
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        debug!("404 for {}", url);
        return Ok(None);
    }
    if !status.is_success() {
        return Err(SourceError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    Ok(Some(response.bytes().await?.to_vec()))
}
