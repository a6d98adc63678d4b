use crate::domain::model::{Catalog, CatalogFormat, Product};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{BoxmatchError, Result};
use csv::{ByteRecord, ReaderBuilder};

/// Parses a numeric cell, accepting either `decimal` or `.` as the separator.
/// Empty, unparseable and NaN cells become `None`.
pub fn parse_decimal(raw: &str, decimal: char) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = trimmed.parse::<f64>().ok().or_else(|| {
        if decimal != '.' && trimmed.matches(decimal).count() == 1 && !trimmed.contains('.') {
            trimmed.replacen(decimal, ".", 1).parse::<f64>().ok()
        } else {
            None
        }
    });

    parsed.filter(|value| !value.is_nan())
}

pub fn parse_code(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

struct ColumnPositions {
    code: usize,
    quantity: usize,
    height: usize,
    width: usize,
    depth: usize,
    extra: Vec<usize>,
}

fn locate_columns(headers: &[String], format: &CatalogFormat) -> Result<ColumnPositions> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| BoxmatchError::MissingColumnError {
                column: name.to_string(),
            })
    };

    let columns = &format.columns;
    let positions = ColumnPositions {
        code: find(&columns.code)?,
        quantity: find(&columns.quantity)?,
        height: find(&columns.height)?,
        width: find(&columns.width)?,
        depth: find(&columns.depth)?,
        extra: Vec::new(),
    };

    let required = [
        positions.code,
        positions.quantity,
        positions.height,
        positions.width,
        positions.depth,
    ];
    let extra = (0..headers.len())
        .filter(|position| !required.contains(position))
        .collect();

    Ok(ColumnPositions { extra, ..positions })
}

/// Cell texts read as missing in passthrough columns, besides blank cells.
const MISSING_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing_text(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed)
}

// Short rows yield "" for their absent trailing cells.
fn cell(record: &ByteRecord, position: usize) -> String {
    record
        .get(position)
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .unwrap_or_default()
}

/// Parses delimited catalog text into a `Catalog`.
pub fn parse_catalog(data: &[u8], format: &CatalogFormat, source: &str) -> Result<Catalog> {
    if !format.delimiter.is_ascii() {
        return Err(BoxmatchError::ConfigValidationError {
            field: "catalog.delimiter".to_string(),
            message: format!("Delimiter '{}' must be a single ASCII character", format.delimiter),
        });
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(format.delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|bytes| {
            String::from_utf8_lossy(bytes)
                .trim_start_matches('\u{feff}')
                .trim()
                .to_string()
        })
        .collect();

    let positions = locate_columns(&headers, format)?;
    let extra_headers = positions
        .extra
        .iter()
        .map(|&position| headers[position].clone())
        .collect();

    let mut products = Vec::new();
    let mut record = ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        if record.len() > headers.len() {
            return Err(BoxmatchError::RaggedRowError {
                line: record.position().map(|position| position.line()).unwrap_or(0),
                expected: headers.len(),
                found: record.len(),
            });
        }

        let number = |position| parse_decimal(&cell(&record, position), format.decimal);

        let extra = positions
            .extra
            .iter()
            .map(|&position| {
                let value = cell(&record, position);
                if is_missing_text(&value) {
                    None
                } else {
                    Some(value)
                }
            })
            .collect();

        products.push(Product::new(
            parse_code(&cell(&record, positions.code)),
            number(positions.quantity),
            number(positions.height),
            number(positions.width),
            number(positions.depth),
            extra,
        ));
    }

    tracing::debug!("Parsed {} products from {}", products.len(), source);
    Ok(Catalog::new(products, extra_headers, source))
}

/// Fetches and parses the catalog from a source.
pub struct CatalogLoader {
    source: Box<dyn CatalogSource>,
    format: CatalogFormat,
}

impl CatalogLoader {
    pub fn new(source: Box<dyn CatalogSource>, format: CatalogFormat) -> Self {
        Self { source, format }
    }

    pub fn source(&self) -> &str {
        self.source.describe()
    }

    pub async fn load(&self) -> Result<Catalog> {
        tracing::info!("Loading catalog from {}", self.source.describe());
        let data = self.source.fetch().await?;
        let catalog = parse_catalog(&data, &self.format, self.source.describe())?;
        tracing::info!("Loaded {} products", catalog.len());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audit::{audit, AuditCategory};

    const SAMPLE: &str = "Codigo;Descricao;Quantidade;Altura;Largura;Profundidade\n\
                          101;Caneca;12;10,5;8;8\n\
                          102;Livro;3;2;15,25;22\n\
                          103;;abc;1;1;\n";

    #[test]
    fn test_parse_decimal_accepts_both_separators() {
        assert_eq!(parse_decimal("10,5", ','), Some(10.5));
        assert_eq!(parse_decimal("10.5", ','), Some(10.5));
        assert_eq!(parse_decimal(" 7 ", ','), Some(7.0));
        assert_eq!(parse_decimal("-2", ','), Some(-2.0));
    }

    #[test]
    fn test_parse_decimal_maps_garbage_to_none() {
        assert_eq!(parse_decimal("", ','), None);
        assert_eq!(parse_decimal("   ", ','), None);
        assert_eq!(parse_decimal("abc", ','), None);
        assert_eq!(parse_decimal("1.234,5", ','), None);
        assert_eq!(parse_decimal("NaN", ','), None);
    }

    #[test]
    fn test_parse_code() {
        assert_eq!(parse_code(" 42 "), Some(42));
        assert_eq!(parse_code("4.2"), None);
        assert_eq!(parse_code(""), None);
    }

    #[test]
    fn test_parse_catalog_normalizes_rows() {
        let catalog =
            parse_catalog(SAMPLE.as_bytes(), &CatalogFormat::default(), "sample").unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.extra_headers(), &["Descricao".to_string()]);

        let mug = catalog.get(101).unwrap();
        assert_eq!(mug.quantity, Some(12.0));
        assert_eq!(mug.unit_volume, Some(10.5 * 8.0 * 8.0));
        assert_eq!(mug.total_volume, Some(10.5 * 8.0 * 8.0 * 12.0));
        assert_eq!(mug.extra, vec![Some("Caneca".to_string())]);

        let broken = catalog.get(103).unwrap();
        assert_eq!(broken.quantity, None);
        assert_eq!(broken.depth, None);
        assert_eq!(broken.unit_volume, None);
        assert_eq!(broken.extra, vec![None]);
    }

    #[test]
    fn test_parse_catalog_rejects_missing_column() {
        let data = "Codigo;Quantidade;Altura;Largura\n1;1;1;1\n";
        let err = parse_catalog(data.as_bytes(), &CatalogFormat::default(), "sample").unwrap_err();
        assert!(matches!(
            err,
            BoxmatchError::MissingColumnError { ref column } if column == "Profundidade"
        ));
    }

    #[test]
    fn test_parse_catalog_pads_short_rows_with_missing_values() {
        let data = "Codigo;Descricao;Quantidade;Altura;Largura;Profundidade\n\
                    1;Caneca;2;1;1;1\n\
                    2;Prato;3;1;1\n";
        let catalog = parse_catalog(data.as_bytes(), &CatalogFormat::default(), "sample").unwrap();

        assert_eq!(catalog.len(), 2);
        let plate = catalog.get(2).unwrap();
        assert_eq!(plate.quantity, Some(3.0));
        assert_eq!(plate.depth, None);
        assert_eq!(plate.unit_volume, None);

        let report = audit(&catalog);
        let missing = report.finding(AuditCategory::MissingValues).unwrap();
        let codes: Vec<Option<i64>> = missing.rows.iter().map(|p| p.code).collect();
        assert_eq!(codes, vec![Some(2)]);
    }

    #[test]
    fn test_parse_catalog_rejects_rows_longer_than_header() {
        let data = "Codigo;Quantidade;Altura;Largura;Profundidade\n\
                    1;1;1;1;1\n\
                    2;1;1;1;1;9\n";
        let err = parse_catalog(data.as_bytes(), &CatalogFormat::default(), "sample").unwrap_err();
        assert!(matches!(
            err,
            BoxmatchError::RaggedRowError {
                line: 3,
                expected: 5,
                found: 6
            }
        ));
    }

    #[test]
    fn test_parse_catalog_reads_na_tokens_as_missing() {
        let data = "Codigo;Descricao;Fornecedor;Quantidade;Altura;Largura;Profundidade\n\
                    1;NA;null;2;1;1;1\n\
                    2; N/A ;Acme;2;1;1;1\n\
                    3;NAN;nan;2;1;1;1\n";
        let catalog = parse_catalog(data.as_bytes(), &CatalogFormat::default(), "sample").unwrap();

        assert_eq!(catalog.get(1).unwrap().extra, vec![None, None]);
        assert_eq!(
            catalog.get(2).unwrap().extra,
            vec![None, Some("Acme".to_string())]
        );
        assert_eq!(
            catalog.get(3).unwrap().extra,
            vec![Some("NAN".to_string()), None]
        );
        assert!(is_missing_text("#N/A"));
        assert!(!is_missing_text("Nada"));
    }

    #[test]
    fn test_parse_catalog_with_custom_format() {
        let mut format = CatalogFormat {
            delimiter: ',',
            decimal: '.',
            ..CatalogFormat::default()
        };
        format.columns.code = "sku".to_string();
        let data = "sku,Quantidade,Altura,Largura,Profundidade\n9,2,1.5,2,2\n";

        let catalog = parse_catalog(data.as_bytes(), &format, "sample").unwrap();
        assert_eq!(catalog.get(9).and_then(|p| p.unit_volume), Some(6.0));
        assert!(catalog.extra_headers().is_empty());
    }
}
