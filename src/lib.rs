pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::shell::Shell;
pub use config::TomlConfig;
pub use crate::core::{
    audit::{audit, AuditCategory, AuditReport},
    loader::CatalogLoader,
    recommend::recommend,
    registry::PackageRegistry,
    session::Session,
};
pub use domain::model::{Catalog, CatalogFormat, Package, Product, Recommendation};
pub use utils::error::{BoxmatchError, Result};
