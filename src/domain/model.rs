use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One catalog row. Numeric fields that failed to parse are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub code: Option<i64>,
    pub quantity: Option<f64>,
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub depth: Option<f64>,
    pub unit_volume: Option<f64>,
    pub total_volume: Option<f64>,
    /// Non-required columns in file order; empty cells are `None`.
    pub extra: Vec<Option<String>>,
}

impl Product {
    pub fn new(
        code: Option<i64>,
        quantity: Option<f64>,
        height: Option<f64>,
        width: Option<f64>,
        depth: Option<f64>,
        extra: Vec<Option<String>>,
    ) -> Self {
        let unit_volume = match (height, width, depth) {
            (Some(h), Some(w), Some(d)) => Some(h * w * d),
            _ => None,
        };
        let total_volume = unit_volume.zip(quantity).map(|(v, q)| v * q);

        Self {
            code,
            quantity,
            height,
            width,
            depth,
            unit_volume,
            total_volume,
            extra,
        }
    }

    pub fn dimensions(&self) -> [Option<f64>; 3] {
        [self.height, self.width, self.depth]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub name: String,
    pub height: f64,
    pub width: f64,
    pub depth: f64,
    pub total_volume: f64,
}

impl Package {
    /// Builds a package without validation; use `PackageRegistry::register` for user input.
    pub(crate) fn new(name: impl Into<String>, height: f64, width: f64, depth: f64) -> Self {
        Self {
            name: name.into(),
            height,
            width,
            depth,
            total_volume: height * width * depth,
        }
    }
}

/// The loaded product table. Read-only once built.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<i64, usize>,
    extra_headers: Vec<String>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, extra_headers: Vec<String>, source: impl Into<String>) -> Self {
        let mut index = HashMap::new();
        for (position, product) in products.iter().enumerate() {
            if let Some(code) = product.code {
                index.entry(code).or_insert(position);
            }
        }

        Self {
            products,
            index,
            extra_headers,
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// First product carrying `code`.
    pub fn get(&self, code: i64) -> Option<&Product> {
        self.index.get(&code).map(|&position| &self.products[position])
    }

    pub fn contains(&self, code: i64) -> bool {
        self.index.contains_key(&code)
    }

    pub fn extra_headers(&self) -> &[String] {
        &self.extra_headers
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub code: String,
    pub quantity: String,
    pub height: String,
    pub width: String,
    pub depth: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            code: "Codigo".to_string(),
            quantity: "Quantidade".to_string(),
            height: "Altura".to_string(),
            width: "Largura".to_string(),
            depth: "Profundidade".to_string(),
        }
    }
}

impl ColumnMapping {
    pub fn required(&self) -> [(&'static str, &str); 5] {
        [
            ("code", self.code.as_str()),
            ("quantity", self.quantity.as_str()),
            ("height", self.height.as_str()),
            ("width", self.width.as_str()),
            ("depth", self.depth.as_str()),
        ]
    }
}

/// How the catalog file is laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFormat {
    pub delimiter: char,
    pub decimal: char,
    pub columns: ColumnMapping,
}

impl Default for CatalogFormat {
    fn default() -> Self {
        Self {
            delimiter: ';',
            decimal: ',',
            columns: ColumnMapping::default(),
        }
    }
}

/// Outcome of a package lookup. `NoFit` is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
    Fit {
        package: Package,
        required_volume: f64,
    },
    NoFit {
        required_volume: Option<f64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_derives_volumes() {
        let product = Product::new(Some(1), Some(3.0), Some(2.0), Some(5.0), Some(10.0), vec![]);
        assert_eq!(product.unit_volume, Some(100.0));
        assert_eq!(product.total_volume, Some(300.0));
    }

    #[test]
    fn test_missing_inputs_propagate_to_volumes() {
        let no_depth = Product::new(Some(1), Some(3.0), Some(2.0), Some(5.0), None, vec![]);
        assert_eq!(no_depth.unit_volume, None);
        assert_eq!(no_depth.total_volume, None);

        let no_quantity = Product::new(Some(1), None, Some(2.0), Some(5.0), Some(1.0), vec![]);
        assert_eq!(no_quantity.unit_volume, Some(10.0));
        assert_eq!(no_quantity.total_volume, None);
    }

    #[test]
    fn test_catalog_index_keeps_first_occurrence() {
        let products = vec![
            Product::new(Some(7), Some(1.0), Some(1.0), Some(1.0), Some(1.0), vec![]),
            Product::new(Some(7), Some(2.0), Some(2.0), Some(2.0), Some(2.0), vec![]),
            Product::new(None, Some(1.0), Some(1.0), Some(1.0), Some(1.0), vec![]),
        ];
        let catalog = Catalog::new(products, vec![], "memory");

        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains(7));
        assert_eq!(catalog.get(7).and_then(|p| p.unit_volume), Some(1.0));
        assert!(catalog.get(8).is_none());
    }
}
