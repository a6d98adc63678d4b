use crate::core::registry::PackageRegistry;
use crate::domain::model::{Catalog, Package, Recommendation};
use crate::utils::error::{BoxmatchError, Result};

/// Smallest package whose volume holds `required_volume`; ties go to the earliest registered.
pub fn smallest_fitting<'a>(
    packages: impl IntoIterator<Item = &'a Package>,
    required_volume: f64,
) -> Option<&'a Package> {
    packages
        .into_iter()
        .filter(|package| package.total_volume >= required_volume)
        .min_by(|a, b| a.total_volume.total_cmp(&b.total_volume))
}

pub fn parse_product_code(code: &str) -> Result<i64> {
    code.trim()
        .parse::<i64>()
        .map_err(|_| BoxmatchError::InvalidInput {
            field: "code",
            value: code.to_string(),
            reason: "product codes are whole numbers".to_string(),
        })
}

pub fn recommend(
    catalog: &Catalog,
    registry: &PackageRegistry,
    code: &str,
    quantity: i64,
) -> Result<Recommendation> {
    let code = parse_product_code(code)?;

    if quantity < 1 {
        return Err(BoxmatchError::InvalidInput {
            field: "quantity",
            value: quantity.to_string(),
            reason: "quantity must be at least 1".to_string(),
        });
    }

    let product = catalog
        .get(code)
        .ok_or(BoxmatchError::ProductNotFound { code })?;

    let required_volume = product.unit_volume.map(|volume| volume * quantity as f64);

    let recommendation = match required_volume.and_then(|required| {
        smallest_fitting(registry.iter(), required).map(|package| (package, required))
    }) {
        Some((package, required_volume)) => Recommendation::Fit {
            package: package.clone(),
            required_volume,
        },
        None => Recommendation::NoFit { required_volume },
    };

    match &recommendation {
        Recommendation::Fit { package, required_volume } => tracing::info!(
            "Product {} x{} needs {} -> {}",
            code,
            quantity,
            required_volume,
            package.name
        ),
        Recommendation::NoFit { required_volume } => tracing::warn!(
            "Product {} x{} needs {:?}; no package fits",
            code,
            quantity,
            required_volume
        ),
    }

    Ok(recommendation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Product;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Product::new(Some(1), Some(5.0), Some(10.0), Some(10.0), Some(10.0), vec![]),
                Product::new(Some(2), Some(5.0), Some(10.0), None, Some(10.0), vec![]),
            ],
            vec![],
            "fixture",
        )
    }

    fn registry(volumes: &[(&str, f64)]) -> PackageRegistry {
        let mut registry = PackageRegistry::new();
        for &(name, volume) in volumes {
            registry.register(name, volume, 1.0, 1.0).unwrap();
        }
        registry
    }

    #[test]
    fn test_picks_smallest_fitting_package() {
        let registry = registry(&[("small", 1500.0), ("medium", 2400.0), ("large", 3000.0)]);
        let result = recommend(&catalog(), &registry, "1", 2).unwrap();

        match result {
            Recommendation::Fit {
                package,
                required_volume,
            } => {
                assert_eq!(package.name, "medium");
                assert_eq!(package.total_volume, 2400.0);
                assert_eq!(required_volume, 2000.0);
            }
            other => panic!("expected a fit, got {:?}", other),
        }
    }

    #[test]
    fn test_insertion_order_does_not_hide_smaller_fit() {
        let registry = registry(&[("large", 3000.0), ("exact", 2000.0), ("medium", 2400.0)]);
        let result = recommend(&catalog(), &registry, "1", 2).unwrap();
        assert!(matches!(result, Recommendation::Fit { ref package, .. } if package.name == "exact"));
    }

    #[test]
    fn test_ties_go_to_first_registered() {
        let registry = registry(&[("first", 2400.0), ("second", 2400.0)]);
        let picked = smallest_fitting(registry.iter(), 2000.0).unwrap();
        assert_eq!(picked.name, "first");
    }

    #[test]
    fn test_no_fit_is_not_an_error() {
        let registry = registry(&[("small", 1500.0)]);
        let result = recommend(&catalog(), &registry, "1", 2).unwrap();
        assert_eq!(
            result,
            Recommendation::NoFit {
                required_volume: Some(2000.0)
            }
        );
    }

    #[test]
    fn test_missing_dimensions_yield_no_fit() {
        let registry = PackageRegistry::with_defaults();
        let result = recommend(&catalog(), &registry, "2", 1).unwrap();
        assert_eq!(
            result,
            Recommendation::NoFit {
                required_volume: None
            }
        );
    }

    #[test]
    fn test_invalid_code() {
        let registry = PackageRegistry::with_defaults();
        let err = recommend(&catalog(), &registry, "abc", 1).unwrap_err();
        assert!(matches!(err, BoxmatchError::InvalidInput { field: "code", .. }));
    }

    #[test]
    fn test_unknown_code() {
        let registry = PackageRegistry::with_defaults();
        let err = recommend(&catalog(), &registry, "99999", 1).unwrap_err();
        assert!(matches!(err, BoxmatchError::ProductNotFound { code: 99999 }));
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let registry = PackageRegistry::with_defaults();
        let err = recommend(&catalog(), &registry, "1", 0).unwrap_err();
        assert!(matches!(err, BoxmatchError::InvalidInput { field: "quantity", .. }));
    }

    #[test]
    fn test_code_is_trimmed() {
        assert_eq!(parse_product_code(" 1 ").unwrap(), 1);
    }
}
