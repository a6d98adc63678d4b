use crate::domain::model::CatalogFormat;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Where the raw catalog bytes come from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>>;

    /// Human-readable identifier, used in logs and reports.
    fn describe(&self) -> &str;
}

pub trait ConfigProvider: Send + Sync {
    fn source(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn catalog_format(&self) -> &CatalogFormat;
}
