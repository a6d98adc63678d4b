// Adapters layer: concrete catalog sources.

pub mod file;
pub mod http;

use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::Result;

pub use file::FileSource;
pub use http::HttpSource;

/// Picks the HTTP adapter for http(s) URLs and the file adapter for everything else.
pub fn source_from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Box<dyn CatalogSource>> {
    let source = config.source();
    if source.starts_with("http://") || source.starts_with("https://") {
        Ok(Box::new(HttpSource::new(source, config.request_timeout())?))
    } else {
        Ok(Box::new(FileSource::new(source)))
    }
}
