use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use songbook_core::domain::SongDetails;
use songbook_core::ports::{MetadataError, MetadataProvider};

use crate::config::MetadataConfig;
use crate::mapping::{InfoResponse, to_details};

/// Client for the external song info API (`GET {base_url}/info?group=..&song=..`).
#[derive(Clone)]
pub struct HttpMetadataProvider {
  base_url: String,
  client: Client,
}

impl HttpMetadataProvider {
  pub fn new(config: &MetadataConfig) -> Result<Self, MetadataError> {
    let client = Client::builder()
      .timeout(config.timeout())
      .build()
      .map_err(|e| MetadataError::Network(format!("building http client: {e}")))?;

    Ok(Self { base_url: config.base_url.trim_end_matches('/').to_string(), client })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  async fn fetch_info(&self, group: &str, title: &str) -> Result<InfoResponse, MetadataError> {
    let url = format!("{}/info", self.base_url);
    let resp = self
      .client
      .get(&url)
      .query(&[("group", group), ("song", title)])
      .send()
      .await
      .map_err(|e| MetadataError::Network(format!("request to {url} failed: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
      return Err(MetadataError::Status(status.as_u16()));
    }

    resp.json().await.map_err(|e| MetadataError::Decode(format!("invalid JSON from {url}: {e}")))
  }
}

#[async_trait]
impl MetadataProvider for HttpMetadataProvider {
  async fn song_details(&self, group: &str, title: &str) -> Result<SongDetails, MetadataError> {
    debug!(group, title, "requesting song details");

    let details = self.fetch_info(group, title).await.and_then(to_details).inspect_err(|e| {
      warn!(group, title, error = %e, "song details unavailable");
    })?;

    debug!(
      group,
      title,
      release_date = ?details.release_date,
      has_text = details.text.is_some(),
      "song details received"
    );
    Ok(details)
  }
}
