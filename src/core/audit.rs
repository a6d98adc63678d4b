//! Data quality checks over a loaded catalog.
//!
//! Each category is a plain predicate over a single [`Product`]. Findings are
//! informational: an audit never fails and never changes the catalog.

use crate::domain::model::{Catalog, Product};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditCategory {
    MissingValues,
    NegativeStock,
    NonIntegerQuantity,
    ZeroStock,
    InvalidDimensions,
}

impl AuditCategory {
    pub const ALL: [AuditCategory; 5] = [
        AuditCategory::MissingValues,
        AuditCategory::NegativeStock,
        AuditCategory::NonIntegerQuantity,
        AuditCategory::ZeroStock,
        AuditCategory::InvalidDimensions,
    ];

    pub fn matches(self, product: &Product) -> bool {
        match self {
            AuditCategory::MissingValues => has_missing_values(product),
            AuditCategory::NegativeStock => has_negative_stock(product),
            AuditCategory::NonIntegerQuantity => has_non_integer_quantity(product),
            AuditCategory::ZeroStock => has_zero_stock(product),
            AuditCategory::InvalidDimensions => has_invalid_dimensions(product),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuditCategory::MissingValues => "Products with missing values",
            AuditCategory::NegativeStock => "Products with negative stock",
            AuditCategory::NonIntegerQuantity => "Products with non-integer quantity",
            AuditCategory::ZeroStock => "Products with zero stock",
            AuditCategory::InvalidDimensions => "Products with invalid dimensions",
        }
    }

    pub fn clean_message(self) -> &'static str {
        match self {
            AuditCategory::MissingValues => "No products with missing values.",
            AuditCategory::NegativeStock => "No products with negative stock.",
            AuditCategory::NonIntegerQuantity => "All products have integer quantities.",
            AuditCategory::ZeroStock => "No products with zero stock.",
            AuditCategory::InvalidDimensions => "No products with invalid dimensions.",
        }
    }
}

pub fn has_missing_values(product: &Product) -> bool {
    product.code.is_none()
        || product.quantity.is_none()
        || product.dimensions().iter().any(Option::is_none)
        || product.extra.iter().any(Option::is_none)
}

pub fn has_negative_stock(product: &Product) -> bool {
    product.quantity.is_some_and(|q| q < 0.0)
}

pub fn has_non_integer_quantity(product: &Product) -> bool {
    // A missing quantity fails the modulo check the same way NaN does.
    match product.quantity {
        Some(q) => q % 1.0 != 0.0,
        None => true,
    }
}

pub fn has_zero_stock(product: &Product) -> bool {
    product.quantity == Some(0.0)
}

pub fn has_invalid_dimensions(product: &Product) -> bool {
    product
        .dimensions()
        .iter()
        .any(|dimension| dimension.map_or(true, |value| value <= 0.0))
}

/// Number of rows whose code already appeared on an earlier row.
/// Rows without a code count as sharing one code.
pub fn count_duplicate_codes(products: &[Product]) -> usize {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|product| !seen.insert(product.code))
        .count()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub category: AuditCategory,
    pub rows: Vec<Product>,
}

impl Finding {
    pub fn is_clean(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "count", rename_all = "snake_case")]
pub enum DuplicateStatus {
    Clean,
    Warning(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub findings: Vec<Finding>,
    pub duplicate_codes: usize,
}

impl AuditReport {
    pub fn finding(&self, category: AuditCategory) -> Option<&Finding> {
        self.findings.iter().find(|f| f.category == category)
    }

    pub fn duplicate_status(&self) -> DuplicateStatus {
        if self.duplicate_codes > 0 {
            DuplicateStatus::Warning(self.duplicate_codes)
        } else {
            DuplicateStatus::Clean
        }
    }

    pub fn is_clean(&self) -> bool {
        self.findings.iter().all(Finding::is_clean) && self.duplicate_codes == 0
    }
}

pub fn audit(catalog: &Catalog) -> AuditReport {
    let findings: Vec<Finding> = AuditCategory::ALL
        .iter()
        .map(|&category| Finding {
            category,
            rows: catalog
                .products()
                .iter()
                .filter(|product| category.matches(product))
                .cloned()
                .collect(),
        })
        .collect();
    let duplicate_codes = count_duplicate_codes(catalog.products());

    for finding in findings.iter().filter(|f| !f.is_clean()) {
        tracing::debug!("{}: {}", finding.category.title(), finding.rows.len());
    }
    tracing::info!(
        "Audited {} products: {} flagged categories, {} duplicate codes",
        catalog.len(),
        findings.iter().filter(|f| !f.is_clean()).count(),
        duplicate_codes
    );

    AuditReport {
        findings,
        duplicate_codes,
    }
}
