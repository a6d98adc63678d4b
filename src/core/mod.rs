pub mod audit;
pub mod loader;
pub mod recommend;
pub mod registry;
pub mod session;

pub use crate::domain::model::{Catalog, CatalogFormat, Package, Product, Recommendation};
pub use crate::domain::ports::{CatalogSource, ConfigProvider};
pub use crate::utils::error::Result;
