use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Catalog, CatalogValue, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – archive export: header row, `#` comment lines allowed
/// * `.json`    – `[{ "pl_name": ..., "pl_rade": ..., ... }, ...]`
/// * `.parquet` – flat columns, one row per planet
pub fn load_file(path: &Path) -> Result<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let catalog = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    log::info!(
        "loaded {} records with {} columns from {}",
        catalog.len(),
        catalog.column_names.len(),
        path.display()
    );
    Ok(catalog)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: one header row with column names, one row per planet.
///
/// The NASA Exoplanet Archive export prepends `#` comment lines describing
/// each column and pads some header names with whitespace; both are handled
/// here so the dump loads as downloaded.
fn load_csv(path: &Path) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::Headers)
        .from_path(path)
        .context("opening CSV")?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut rec = Record::default();
        for (col_idx, value) in row.iter().enumerate() {
            let Some(col_name) = headers.get(col_idx) else {
                bail!("CSV row {row_no}: more fields than header columns");
            };
            rec.set(col_name.clone(), guess_value(value));
        }
        records.push(rec);
    }

    Ok(Catalog::from_records(records))
}

/// Type-guess a raw CSV cell. Empty cells are `Null`, not empty strings —
/// the engine's null-checks depend on the distinction.
fn guess_value(s: &str) -> CatalogValue {
    let s = s.trim();
    if s.is_empty() {
        return CatalogValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CatalogValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CatalogValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CatalogValue::Bool(s == "true");
    }
    CatalogValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "pl_name": "Kepler-10 b",
///     "pl_rade": 1.47,
///     "disc_facility": "Kepler",
///     "st_spectype": null
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json_records(&text)
}

fn parse_json_records(text: &str) -> Result<Catalog> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut rec = Record::default();
        for (key, val) in obj {
            rec.set(key.clone(), json_to_value(val));
        }
        records.push(rec);
    }

    Ok(Catalog::from_records(records))
}

fn json_to_value(val: &JsonValue) -> CatalogValue {
    match val {
        JsonValue::String(s) => CatalogValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CatalogValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CatalogValue::Float(f)
            } else {
                CatalogValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CatalogValue::Bool(*b),
        JsonValue::Null => CatalogValue::Null,
        other => CatalogValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet catalog with flat columns, one row per planet.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); strings, ints, floats, and bools are
/// mapped to their `CatalogValue` counterparts, anything else to text.
fn load_parquet(path: &Path) -> Result<Catalog> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let col_names: Vec<String> = schema
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();

        for row in 0..batch.num_rows() {
            let mut rec = Record::default();
            for (col_idx, col_name) in col_names.iter().enumerate() {
                let value = extract_value(batch.column(col_idx), row);
                rec.set(col_name.clone(), value);
            }
            records.push(rec);
        }
    }

    Ok(Catalog::from_records(records))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_value(col: &Arc<dyn Array>, row: usize) -> CatalogValue {
    if col.is_null(row) {
        return CatalogValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                CatalogValue::Text(s.value(row).to_string())
            } else {
                // LargeStringArray
                let s = col.as_string::<i64>();
                CatalogValue::Text(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            CatalogValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            CatalogValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            CatalogValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            CatalogValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            CatalogValue::Bool(arr.value(row))
        }
        _ => CatalogValue::Text(format!("{:?}", col.data_type())),
    }
}
