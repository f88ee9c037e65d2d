use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

// ---------------------------------------------------------------------------
// Column names — NASA Exoplanet Archive "Confirmed Planets" schema subset
// ---------------------------------------------------------------------------

/// Catalog column names used by the filter engine and classifiers.
///
/// These follow the archive's CSV export headers verbatim. The loader accepts
/// any superset of these columns; a record simply carries whatever columns its
/// source row had.
pub mod columns {
    // Discovery
    pub const DISC_FACILITY: &str = "disc_facility";
    pub const DISCOVERY_METHOD: &str = "discoverymethod";
    pub const DISC_YEAR: &str = "disc_year";
    pub const SY_KEPMAG: &str = "sy_kepmag";
    pub const SY_KMAG: &str = "sy_kmag";

    // Stellar
    pub const ST_SPECTYPE: &str = "st_spectype";
    pub const ST_TEFF: &str = "st_teff";
    pub const ST_MET: &str = "st_met";
    pub const ST_AGE: &str = "st_age";
    pub const ST_RAD: &str = "st_rad";
    pub const ST_RADERR1: &str = "st_raderr1";
    pub const ST_RADERR2: &str = "st_raderr2";

    // Planetary
    pub const PL_RADE: &str = "pl_rade";
    pub const PL_RADEERR1: &str = "pl_radeerr1";
    pub const PL_RADEERR2: &str = "pl_radeerr2";
    pub const PL_BMASSE: &str = "pl_bmasse";
    pub const PL_BMASSEERR1: &str = "pl_bmasseerr1";
    pub const PL_BMASSEERR2: &str = "pl_bmasseerr2";
    pub const PL_DENS: &str = "pl_dens";
    pub const PL_ORBECCEN: &str = "pl_orbeccen";
    pub const PL_TRANDEP: &str = "pl_trandep";
    pub const PL_EQT: &str = "pl_eqt";
    pub const PL_ORBPER: &str = "pl_orbper";
    pub const PL_IMPPAR: &str = "pl_imppar";

    // System
    pub const SY_PNUM: &str = "sy_pnum";

    // Ephemeral columns appended by the composition classifier. Not part of
    // the persistent schema; present only on catalogs returned by
    // `with_composition`.
    pub const DENSITY_RATIO: &str = "density_ratio";
    pub const COMPOSITION: &str = "composition";
}

// ---------------------------------------------------------------------------
// CatalogValue – a single cell of the catalog
// ---------------------------------------------------------------------------

/// A dynamically-typed catalog cell.
///
/// The archive export mixes text, integer, and floating-point columns, and
/// any cell may be empty. `Null` is distinct from zero. Used in `BTreeSet`
/// downstream so `CatalogValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CatalogValue in BTreeSet --

impl Eq for CatalogValue {}

impl PartialOrd for CatalogValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CatalogValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CatalogValue::*;
        fn discriminant(v: &CatalogValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CatalogValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CatalogValue::Text(s) => s.hash(state),
            CatalogValue::Integer(i) => i.hash(state),
            CatalogValue::Float(f) => f.to_bits().hash(state),
            CatalogValue::Bool(b) => b.hash(state),
            CatalogValue::Null => {}
        }
    }
}

impl fmt::Display for CatalogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogValue::Text(s) => write!(f, "{s}"),
            CatalogValue::Integer(i) => write!(f, "{i}"),
            CatalogValue::Float(v) => write!(f, "{v}"),
            CatalogValue::Bool(b) => write!(f, "{b}"),
            CatalogValue::Null => write!(f, "<null>"),
        }
    }
}

impl CatalogValue {
    /// Interpret the value as an `f64` for threshold comparisons.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CatalogValue::Float(v) => Some(*v),
            CatalogValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Interpret the value as text for exact and prefix matching.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CatalogValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CatalogValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Record – one confirmed planet (one row of the catalog)
// ---------------------------------------------------------------------------

/// A single catalog row: a flat column → value mapping.
///
/// Missing columns and explicit `Null` cells are treated uniformly by the
/// typed accessors, which is exactly what the filter engine's null-checks
/// rely on.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub values: BTreeMap<String, CatalogValue>,
}

impl Record {
    pub fn new(values: BTreeMap<String, CatalogValue>) -> Self {
        Record { values }
    }

    pub fn get(&self, column: &str) -> Option<&CatalogValue> {
        self.values.get(column)
    }

    /// Numeric view of a cell. `None` for missing, `Null`, or non-numeric
    /// cells — all three exclude the row from numeric predicates.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.values.get(column).and_then(|v| v.as_f64())
    }

    /// Text view of a cell. `None` for missing, `Null`, or non-text cells.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.values.get(column).and_then(|v| v.as_text())
    }

    /// Insert or replace a cell. Used by the classifier to append its
    /// ephemeral columns to a copied record.
    pub fn set(&mut self, column: impl Into<String>, value: CatalogValue) {
        self.values.insert(column.into(), value);
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full in-memory catalog with pre-computed column indices.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// All records (rows), in source order.
    pub records: Vec<Record>,
    /// Ordered list of column names seen across all records.
    pub column_names: Vec<String>,
    /// For each text column the sorted set of distinct values. Used to
    /// enumerate facilities, discovery methods, and spectral types.
    pub text_values: BTreeMap<String, BTreeSet<String>>,
}

impl Catalog {
    /// Build column indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut column_names_set: BTreeSet<String> = BTreeSet::new();
        let mut text_values: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for rec in &records {
            for (col, val) in &rec.values {
                column_names_set.insert(col.clone());
                if let CatalogValue::Text(s) = val {
                    text_values
                        .entry(col.clone())
                        .or_default()
                        .insert(s.clone());
                }
            }
        }
        let column_names: Vec<String> = column_names_set.into_iter().collect();
        Catalog {
            records,
            column_names,
            text_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render the first `n` rows as a fixed-width text table.
    ///
    /// All cells are formatted as strings; `Null` renders as an empty cell.
    /// Intended for logging and notebook-style inspection of filter results.
    pub fn preview(&self, n: usize) -> Result<String> {
        if self.column_names.is_empty() {
            return Ok(String::from("(empty catalog)"));
        }
        let take = self.records.len().min(n);

        let fields: Vec<Field> = self
            .column_names
            .iter()
            .map(|c| Field::new(c.as_str(), DataType::Utf8, true))
            .collect();

        let arrays: Vec<ArrayRef> = self
            .column_names
            .iter()
            .map(|col| {
                let cells: Vec<Option<String>> = self.records[..take]
                    .iter()
                    .map(|rec| match rec.get(col) {
                        None | Some(CatalogValue::Null) => None,
                        Some(v) => Some(v.to_string()),
                    })
                    .collect();
                Arc::new(StringArray::from(cells)) as ArrayRef
            })
            .collect();

        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
            .context("building preview batch")?;
        let table = pretty_format_batches(&[batch]).context("formatting preview")?;
        Ok(table.to_string())
    }
}
