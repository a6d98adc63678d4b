use crate::domain::ports::CatalogSource;
use crate::utils::error::{BoxmatchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Downloads the catalog over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Requesting catalog from: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);

        if !status.is_success() {
            return Err(BoxmatchError::SourceStatusError {
                source_id: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!("Downloaded {} bytes", body.len());
        Ok(body.to_vec())
    }

    fn describe(&self) -> &str {
        &self.url
    }
}
