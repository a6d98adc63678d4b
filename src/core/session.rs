use crate::core::audit::{audit, AuditReport};
use crate::core::loader::CatalogLoader;
use crate::core::recommend::recommend;
use crate::core::registry::PackageRegistry;
use crate::domain::model::{Catalog, Package, Recommendation};
use crate::utils::error::{BoxmatchError, Result};
use tokio::sync::OnceCell;

/// State for one interactive session: the lazily loaded catalog and the package registry.
pub struct Session {
    loader: CatalogLoader,
    catalog: OnceCell<Catalog>,
    registry: PackageRegistry,
}

impl Session {
    pub fn new(loader: CatalogLoader) -> Self {
        Self::with_registry(loader, PackageRegistry::with_defaults())
    }

    pub fn with_registry(loader: CatalogLoader, registry: PackageRegistry) -> Self {
        Self {
            loader,
            catalog: OnceCell::new(),
            registry,
        }
    }

    /// Loads the catalog on first use and returns the cached copy afterwards.
    pub async fn catalog(&self) -> Result<&Catalog> {
        self.catalog
            .get_or_try_init(|| async {
                let catalog = self.loader.load().await?;
                tracing::debug!("Catalog cached for this session");
                Ok::<_, BoxmatchError>(catalog)
            })
            .await
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.initialized()
    }

    pub fn registry(&self) -> &PackageRegistry {
        &self.registry
    }

    pub fn register_package(
        &mut self,
        name: &str,
        height: f64,
        width: f64,
        depth: f64,
    ) -> Result<&Package> {
        self.registry.register(name, height, width, depth)
    }

    pub async fn audit(&self) -> Result<AuditReport> {
        Ok(audit(self.catalog().await?))
    }

    pub async fn recommend(&self, code: &str, quantity: i64) -> Result<Recommendation> {
        let catalog = self.catalog().await?;
        recommend(catalog, &self.registry, code, quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CatalogFormat;
    use crate::domain::ports::CatalogSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const CSV: &str = "Codigo;Quantidade;Altura;Largura;Profundidade\n\
                       1;4;10;10;10\n\
                       2;0;5;5;5\n";

    struct CountingSource {
        body: Option<&'static str>,
        fetches: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CatalogSource for CountingSource {
        async fn fetch(&self) -> Result<Vec<u8>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            match self.body {
                Some(body) => Ok(body.as_bytes().to_vec()),
                None => Err(BoxmatchError::SourceStatusError {
                    source_id: "counting".to_string(),
                    status: 503,
                }),
            }
        }

        fn describe(&self) -> &str {
            "counting"
        }
    }

    fn session(body: Option<&'static str>) -> (Session, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            body,
            fetches: fetches.clone(),
        };
        let loader = CatalogLoader::new(Box::new(source), CatalogFormat::default());
        (Session::new(loader), fetches)
    }

    #[tokio::test]
    async fn test_catalog_is_fetched_once() {
        let (session, fetches) = session(Some(CSV));
        assert!(!session.is_loaded());

        session.catalog().await.unwrap();
        session.audit().await.unwrap();
        session.recommend("1", 1).await.unwrap();

        assert!(session.is_loaded());
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_registered_package_is_used_for_recommendations() {
        let (mut session, _) = session(Some(CSV));

        // 4 units of 1000 need 4000; the smallest default above that is 7500
        let before = session.recommend("1", 4).await.unwrap();
        assert!(matches!(before, Recommendation::Fit { ref package, .. } if package.name == "Caixa C"));

        session.register_package("Crate", 20.0, 20.0, 10.0).unwrap();
        let after = session.recommend("1", 4).await.unwrap();
        assert!(matches!(after, Recommendation::Fit { ref package, .. } if package.name == "Crate"));
        assert_eq!(session.registry().len(), 5);
    }

    #[tokio::test]
    async fn test_source_failure_is_fatal() {
        let (session, _) = session(None);
        let err = session.audit().await.unwrap_err();
        assert!(matches!(err, BoxmatchError::SourceStatusError { status: 503, .. }));
        assert!(!session.is_loaded());
    }

    #[tokio::test]
    async fn test_audit_flags_zero_stock() {
        let (session, _) = session(Some(CSV));
        let report = session.audit().await.unwrap();
        let zero = report
            .finding(crate::core::audit::AuditCategory::ZeroStock)
            .unwrap();
        assert_eq!(zero.rows.len(), 1);
        assert_eq!(zero.rows[0].code, Some(2));
    }
}
