use crate::core::audit::{AuditReport, DuplicateStatus};
use crate::core::registry::PackageRegistry;
use crate::domain::model::{Catalog, Package, Product, Recommendation};
use std::fmt::Write;

const MISSING: &str = "-";

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

/// Left-aligned text table sized to its widest cells.
fn table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(headers));
    let _ = writeln!(
        out,
        "{}",
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("-+-")
    );
    for row in rows {
        let _ = writeln!(out, "{}", line(row.as_slice()));
    }
    out
}

fn product_headers(catalog: &Catalog) -> Vec<String> {
    let mut headers: Vec<String> = ["Code", "Quantity", "Height", "Width", "Depth"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    headers.extend(catalog.extra_headers().iter().cloned());
    headers.push("Unit volume".to_string());
    headers.push("Total volume".to_string());
    headers
}

fn product_row(product: &Product) -> Vec<String> {
    let mut row = vec![
        product
            .code
            .map_or_else(|| MISSING.to_string(), |code| code.to_string()),
        number(product.quantity),
        number(product.height),
        number(product.width),
        number(product.depth),
    ];
    row.extend(
        product
            .extra
            .iter()
            .map(|cell| cell.clone().unwrap_or_else(|| MISSING.to_string())),
    );
    row.push(number(product.unit_volume));
    row.push(number(product.total_volume));
    row
}

pub fn render_products(catalog: &Catalog, products: &[Product]) -> String {
    let rows: Vec<Vec<String>> = products.iter().map(product_row).collect();
    table(&product_headers(catalog), &rows)
}

pub fn render_catalog(catalog: &Catalog) -> String {
    format!(
        "Products ({} rows from {}, loaded {})\n{}",
        catalog.len(),
        catalog.source(),
        catalog.loaded_at().format("%Y-%m-%d %H:%M:%S UTC"),
        render_products(catalog, catalog.products())
    )
}

pub fn render_packages(registry: &PackageRegistry) -> String {
    let headers: Vec<String> = ["Name", "Height", "Width", "Depth", "Total volume"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let rows: Vec<Vec<String>> = registry
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.height.to_string(),
                p.width.to_string(),
                p.depth.to_string(),
                p.total_volume.to_string(),
            ]
        })
        .collect();
    format!("Packages\n{}", table(&headers, &rows))
}

pub fn render_audit(catalog: &Catalog, report: &AuditReport) -> String {
    let mut out = String::from("Data quality\n");

    for finding in &report.findings {
        let _ = writeln!(out, "\n{}:", finding.category.title());
        if finding.is_clean() {
            let _ = writeln!(out, "OK  {}", finding.category.clean_message());
        } else {
            out.push_str(&render_products(catalog, &finding.rows));
        }
    }

    let _ = writeln!(out, "\nProducts with duplicate codes:");
    match report.duplicate_status() {
        DuplicateStatus::Warning(count) => {
            let _ = writeln!(out, "WARN  Duplicate codes found: {}", count);
        }
        DuplicateStatus::Clean => {
            let _ = writeln!(out, "OK  No duplicate codes found.");
        }
    }
    out
}

pub fn render_registered(package: &Package) -> String {
    format!("OK  Package '{}' added.", package.name)
}

pub fn render_recommendation(recommendation: &Recommendation) -> String {
    match recommendation {
        Recommendation::Fit {
            package,
            required_volume,
        } => format!(
            "OK  Suggested package: {}\nDimensions: {} x {} x {} cm\nPackage volume: {} cm³\nRequired volume: {} cm³",
            package.name,
            package.height,
            package.width,
            package.depth,
            package.total_volume,
            required_volume
        ),
        Recommendation::NoFit { .. } => {
            "WARN  No available package holds this product at this quantity.".to_string()
        }
    }
}
