use crate::domain::ports::CatalogSource;
use crate::utils::error::{BoxmatchError, Result};
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    label: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Reading catalog from: {}", self.label);
        tokio::fs::read(&self.path)
            .await
            .map_err(|cause| BoxmatchError::SourceReadError {
                path: self.label.clone(),
                cause,
            })
    }

    fn describe(&self) -> &str {
        &self.label
    }
}
