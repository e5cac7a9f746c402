//! Semicolon-delimited, decimal-comma stock file reader.

use crate::config::Unit;
use crate::error::{Result, StockError};
use crate::model::StockInput;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Column headers of the stock file.
pub(crate) mod columns {
    pub const MODEL: &str = "Modelo_Chapa";
    pub const WIDTH_M: &str = "Largura_m";
    pub const LENGTH_M: &str = "Comprimento_m";
    pub const WIDTH_MM: &str = "Largura_mm";
    pub const LENGTH_MM: &str = "Comprimento_mm";
    pub const PAPER_TYPE: &str = "Tipo_Papel";
    pub const BASIS_WEIGHT: &str = "Gramatura";
    pub const SHEET_COUNT: &str = "Quantidade_Folhas";
    pub const PRICE_PER_KG: &str = "Preco_Kg";
    pub const TOTAL_WEIGHT: &str = "Peso_Total_kg";
    pub const TOTAL_VALUE: &str = "Valor_Total_R$";
}

/// One stock file row with lengths already in mm.
///
/// Numeric cells that fail to parse are `None` rather than failing the whole file.
#[derive(Debug, Clone, PartialEq)]
pub struct StockRow {
    /// 1-based line number in the file (header is line 1).
    pub line: usize,
    pub model: String,
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub paper_type: String,
    pub basis_weight: Option<f64>,
    pub sheet_count: Option<f64>,
    pub price_per_kg: Option<f64>,
}

impl StockRow {
    /// Names of required fields that are empty or did not parse.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.model.trim().is_empty() {
            missing.push("model");
        }
        if self.width.is_none() {
            missing.push("width");
        }
        if self.length.is_none() {
            missing.push("length");
        }
        if self.paper_type.trim().is_empty() {
            missing.push("paper_type");
        }
        if self.basis_weight.is_none() {
            missing.push("basis_weight");
        }
        if self.sheet_count.is_none() {
            missing.push("sheet_count");
        }
        if self.price_per_kg.is_none() {
            missing.push("price_per_kg");
        }
        missing
    }

    /// Convert to stock input when no field is missing. Sheet counts round to whole sheets.
    pub fn to_input(&self) -> Option<StockInput> {
        if !self.missing_fields().is_empty() {
            return None;
        }
        Some(StockInput {
            model: self.model.trim().to_string(),
            width: self.width?,
            length: self.length?,
            unit: Unit::Millimeters,
            paper_type: self.paper_type.trim().to_string(),
            basis_weight: self.basis_weight?,
            quantity: self.sheet_count?.round() as i64,
            price_per_kg: self.price_per_kg?,
        })
    }
}

/// Parse a decimal-comma number ("1,68"). A plain dot is accepted as well.
pub fn parse_decimal(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    let normalized = if cell.contains(',') {
        cell.replace('.', "").replace(',', ".")
    } else {
        cell.to_string()
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Column positions resolved from the header.
struct ColumnMap {
    model: usize,
    width: usize,
    length: usize,
    paper_type: usize,
    basis_weight: usize,
    sheet_count: usize,
    price_per_kg: usize,
    unit: Unit,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| StockError::CsvSchema {
                column: name.to_string(),
            })
        };

        // Files in metres are current; millimetre columns come from older exports.
        let (width, length, unit) = match (find(columns::WIDTH_M), find(columns::WIDTH_MM)) {
            (Some(w), _) => (w, require(columns::LENGTH_M)?, Unit::Meters),
            (None, Some(w)) => (w, require(columns::LENGTH_MM)?, Unit::Millimeters),
            (None, None) => {
                return Err(StockError::CsvSchema {
                    column: columns::WIDTH_M.to_string(),
                })
            }
        };

        Ok(Self {
            model: require(columns::MODEL)?,
            width,
            length,
            paper_type: require(columns::PAPER_TYPE)?,
            basis_weight: require(columns::BASIS_WEIGHT)?,
            sheet_count: require(columns::SHEET_COUNT)?,
            price_per_kg: require(columns::PRICE_PER_KG)?,
            unit,
        })
    }

    fn row(&self, record: &csv::StringRecord, line: usize) -> StockRow {
        let text = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
        let number = |idx: usize| record.get(idx).and_then(parse_decimal);
        let length_mm = |idx: usize| number(idx).map(|v| self.unit.to_mm(v));

        StockRow {
            line,
            model: text(self.model),
            width: length_mm(self.width),
            length: length_mm(self.length),
            paper_type: text(self.paper_type),
            basis_weight: number(self.basis_weight),
            sheet_count: number(self.sheet_count),
            price_per_kg: number(self.price_per_kg),
        }
    }
}

/// Read stock rows from CSV content.
///
/// Derived columns (total weight and value) are ignored; they are recomputed from the
/// independent fields when the rows are loaded into a ledger.
pub fn read_stock_csv<R: Read>(reader: R) -> Result<Vec<StockRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let map = ColumnMap::from_headers(&headers)?;
    debug!("Stock file columns resolved, lengths in {}", map.unit);

    let mut rows = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(idx + 2);
        rows.push(map.row(&record, line));
    }

    Ok(rows)
}

/// Read stock rows from a file.
pub fn read_stock_file(path: &Path) -> Result<Vec<StockRow>> {
    let file = std::fs::File::open(path)?;
    read_stock_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "Modelo_Chapa;Largura_m;Comprimento_m;Tipo_Papel;Gramatura;Quantidade_Folhas;Preco_Kg;Peso_Total_kg;Valor_Total_R$";

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1,68"), Some(1.68));
        assert_eq!(parse_decimal(" 150 "), Some(150.0));
        assert_eq!(parse_decimal("2.6"), Some(2.6));
        assert_eq!(parse_decimal("1.234,5"), Some(1234.5));
        assert_eq!(parse_decimal("-2"), Some(-2.0));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn test_read_metre_file() {
        let content = format!(
            "{}\nCH-01;1,68;2,6;KRAFT;150;10;4,5;6,552;29,48\nCH-02;1,2;2,4;TESTLINER;125;0;3,9;0;0\n",
            HEADER
        );
        let rows = read_stock_csv(content.as_bytes()).expect("parses");
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.line, 2);
        assert_eq!(first.model, "CH-01");
        assert!((first.width.unwrap() - 1680.0).abs() < 1e-9);
        assert!((first.length.unwrap() - 2600.0).abs() < 1e-9);
        assert_eq!(first.paper_type, "KRAFT");
        assert_eq!(first.basis_weight, Some(150.0));
        assert_eq!(first.sheet_count, Some(10.0));
        assert_eq!(first.price_per_kg, Some(4.5));
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn test_read_without_derived_columns() {
        let content = "Modelo_Chapa;Largura_m;Comprimento_m;Tipo_Papel;Gramatura;Quantidade_Folhas;Preco_Kg\nCH-01;1,68;2,6;KRAFT;150;10;4,5\n";
        let rows = read_stock_csv(content.as_bytes()).expect("parses");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].to_input().is_some());
    }

    #[test]
    fn test_read_millimetre_file() {
        let content = "Modelo_Chapa;Largura_mm;Comprimento_mm;Tipo_Papel;Gramatura;Quantidade_Folhas;Preco_Kg\nCH-01;1680;2600;KRAFT;150;10;4,5\n";
        let rows = read_stock_csv(content.as_bytes()).expect("parses");
        assert_eq!(rows[0].width, Some(1680.0));
        assert_eq!(rows[0].length, Some(2600.0));
    }

    #[test]
    fn test_malformed_numbers_become_missing() {
        let content = format!(
            "{}\nCH-01;abc;2,6;KRAFT;;10;4,5;;\nCH-02;1,2;2,4;KRAFT;150;5;3\n",
            HEADER
        );
        let rows = read_stock_csv(content.as_bytes()).expect("file still parses");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].width, None);
        assert_eq!(rows[0].basis_weight, None);
        assert_eq!(rows[0].missing_fields(), vec!["width", "basis_weight"]);
        assert!(rows[0].to_input().is_none());
        assert!(rows[1].to_input().is_some());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let content = format!("{}\n;;;;;;;;\nCH-01;1,68;2,6;KRAFT;150;10;4,5;;\n", HEADER);
        let rows = read_stock_csv(content.as_bytes()).expect("parses");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 3);
    }

    #[test]
    fn test_missing_required_column() {
        let content = "Modelo_Chapa;Largura_m;Comprimento_m;Tipo_Papel;Quantidade_Folhas;Preco_Kg\n";
        match read_stock_csv(content.as_bytes()) {
            Err(StockError::CsvSchema { column }) => assert_eq!(column, "Gramatura"),
            other => panic!("Expected CsvSchema error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_width_column() {
        let content = "Modelo_Chapa;Comprimento_m;Tipo_Papel;Gramatura;Quantidade_Folhas;Preco_Kg\n";
        assert!(matches!(
            read_stock_csv(content.as_bytes()),
            Err(StockError::CsvSchema { .. })
        ));
    }

    #[test]
    fn test_to_input_rounds_sheet_count() {
        let content = format!("{}\nCH-01;1,68;2,6;KRAFT;150;10,0;4,5;;\n", HEADER);
        let rows = read_stock_csv(content.as_bytes()).expect("parses");
        let input = rows[0].to_input().expect("complete row");
        assert_eq!(input.quantity, 10);
        assert_eq!(input.unit, Unit::Millimeters);
    }
}
