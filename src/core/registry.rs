use crate::domain::model::Package;
use crate::utils::error::{BoxmatchError, Result};

const DEFAULT_PACKAGES: [(&str, f64, f64, f64); 4] = [
    ("Caixa A", 20.0, 15.0, 8.0),
    ("Caixa B", 30.0, 25.0, 40.0),
    ("Caixa C", 20.0, 25.0, 15.0),
    ("Caixa D", 8.0, 8.0, 4.0),
];

/// Append-only list of packages available for recommendations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageRegistry {
    packages: Vec<Package>,
}

impl PackageRegistry {
    /// An empty registry, without the built-in boxes.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let packages = DEFAULT_PACKAGES
            .iter()
            .map(|&(name, height, width, depth)| Package::new(name, height, width, depth))
            .collect();
        Self { packages }
    }

    /// Validates and appends a package. Nothing is stored when validation fails.
    pub fn register(&mut self, name: &str, height: f64, width: f64, depth: f64) -> Result<&Package> {
        if name.trim().is_empty() {
            return Err(BoxmatchError::EmptyPackageName);
        }

        for (dimension, value) in [("height", height), ("width", width), ("depth", depth)] {
            // `!(value > 0.0)` also rejects NaN
            if !(value > 0.0) {
                return Err(BoxmatchError::NonPositiveDimension { dimension, value });
            }
        }

        let package = Package::new(name, height, width, depth);
        tracing::info!(
            "Registered package '{}' ({} x {} x {}, volume {})",
            package.name,
            package.height,
            package.width,
            package.depth,
            package.total_volume
        );
        self.packages.push(package);

        Ok(&self.packages[self.packages.len() - 1])
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
