use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::classify::{host_radius_threshold, HostBranch};
use super::model::{columns, Catalog, Record};

// ---------------------------------------------------------------------------
// Criteria: the named, all-optional filter keys for one filtering call
// ---------------------------------------------------------------------------

/// Error raised at the criteria input boundary.
///
/// Row-level problems (missing fields, empty ranges) never error — they
/// silently shrink the result, which is what an exploration tool wants.
/// Malformed criteria documents and unknown preset names are caller
/// mistakes and are rejected explicitly.
#[derive(Debug, Error)]
pub enum CriteriaError {
    #[error("invalid criteria document: {0}")]
    Invalid(#[from] serde_json::Error),
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
}

/// One filtering call's worth of thresholds and matches, every key optional.
/// Unset keys impose no constraint; an all-default `Criteria` is the
/// identity filter.
///
/// Boundary semantics are mixed on purpose and must stay that way to keep
/// published-sample reproductions stable: every numeric bound is strict
/// (`<`, `>`) except the multiplicity pair, which is inclusive
/// (`<=`, `>=`).
///
/// Construct with struct-update syntax:
///
/// ```
/// use exosift::Criteria;
///
/// let criteria = Criteria {
///     mission: Some("Kepler".into()),
///     radius_max: Some(4.0),
///     ..Criteria::default()
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Criteria {
    // -- Discovery --
    /// Exact `disc_facility` match.
    pub mission: Option<String>,
    /// Exact `discoverymethod` match.
    pub discovery_method: Option<String>,
    /// `disc_year` strictly after.
    pub year_min: Option<i32>,
    /// `disc_year` strictly before.
    pub year_max: Option<i32>,
    /// Kepler-band magnitude `sy_kepmag` strictly below.
    pub kp_max: Option<f64>,
    /// K-band magnitude `sy_kmag` strictly below.
    pub ks_max: Option<f64>,

    // -- Stellar --
    /// `st_spectype` prefix match; a null spectral type is treated as the
    /// empty string and therefore fails any non-empty prefix.
    pub spectral_prefix: Option<String>,
    pub teff_min: Option<f64>,
    pub teff_max: Option<f64>,
    pub metallicity_min: Option<f64>,
    pub metallicity_max: Option<f64>,
    pub age_min: Option<f64>,
    pub age_max: Option<f64>,
    /// Relative uncertainty gate on `st_rad`.
    pub stellar_radius_err_max: Option<f64>,
    /// Fulton et al. 2017 host cut: keep rows with `st_rad` above the
    /// temperature-dependent threshold.
    pub fulton_2017: bool,
    /// Giant/dwarf branch selection on the `st_rad / pl_rade` ratio.
    pub host_branch: Option<HostBranch>,

    // -- Planetary --
    pub radius_min: Option<f64>,
    pub radius_max: Option<f64>,
    /// Relative uncertainty gate on `pl_rade`.
    pub radius_err_max: Option<f64>,
    pub mass_min: Option<f64>,
    pub mass_max: Option<f64>,
    /// Relative uncertainty gate on `pl_bmasse`.
    pub mass_err_max: Option<f64>,
    pub density_min: Option<f64>,
    pub density_max: Option<f64>,
    pub eccentricity_max: Option<f64>,
    pub transit_depth_min: Option<f64>,
    pub transit_depth_max: Option<f64>,
    pub eqt_min: Option<f64>,
    pub eqt_max: Option<f64>,
    /// Orbital period `pl_orbper` strictly below, days.
    pub period_max: Option<f64>,
    /// Impact parameter `pl_imppar` strictly below.
    pub impact_max: Option<f64>,

    // -- System --
    /// Planet count `sy_pnum` at or above (inclusive).
    pub multiplicity_min: Option<u32>,
    /// Planet count `sy_pnum` at or below (inclusive).
    pub multiplicity_max: Option<u32>,
}

impl Criteria {
    /// Parse a criteria document from JSON. Unknown keys and mistyped
    /// values are rejected rather than silently ignored.
    pub fn from_json(text: &str) -> Result<Self, CriteriaError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Lower the named keys into the ordered predicate list the engine
    /// evaluates. Adding a criterion means adding one entry here — the
    /// engine itself never changes.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut preds = Vec::new();

        // -- Discovery --
        if let Some(facility) = &self.mission {
            preds.push(Predicate::equals(columns::DISC_FACILITY, facility.clone()));
        }
        if let Some(method) = &self.discovery_method {
            preds.push(Predicate::equals(columns::DISCOVERY_METHOD, method.clone()));
        }
        push_bounds(
            &mut preds,
            columns::DISC_YEAR,
            self.year_min.map(f64::from),
            self.year_max.map(f64::from),
        );
        push_bounds(&mut preds, columns::SY_KEPMAG, None, self.kp_max);
        push_bounds(&mut preds, columns::SY_KMAG, None, self.ks_max);

        // -- Stellar --
        if let Some(prefix) = &self.spectral_prefix {
            preds.push(Predicate {
                field: columns::ST_SPECTYPE,
                comparison: Comparison::StartsWith(prefix.clone()),
                requires: Vec::new(),
            });
        }
        push_bounds(&mut preds, columns::ST_TEFF, self.teff_min, self.teff_max);
        push_bounds(
            &mut preds,
            columns::ST_MET,
            self.metallicity_min,
            self.metallicity_max,
        );
        push_bounds(&mut preds, columns::ST_AGE, self.age_min, self.age_max);
        if let Some(max) = self.stellar_radius_err_max {
            preds.push(Predicate::relative_error(
                columns::ST_RAD,
                columns::ST_RADERR1,
                columns::ST_RADERR2,
                max,
            ));
        }
        if self.fulton_2017 {
            preds.push(Predicate {
                field: columns::ST_RAD,
                comparison: Comparison::AboveHostRadiusThreshold,
                requires: vec![columns::ST_TEFF, columns::ST_RAD],
            });
        }
        if let Some(branch) = self.host_branch {
            preds.push(Predicate {
                field: columns::ST_RAD,
                comparison: Comparison::HostBranchRatio(branch),
                requires: vec![columns::ST_TEFF, columns::ST_RAD, columns::PL_RADE],
            });
        }

        // -- Planetary --
        push_bounds(&mut preds, columns::PL_RADE, self.radius_min, self.radius_max);
        if let Some(max) = self.radius_err_max {
            preds.push(Predicate::relative_error(
                columns::PL_RADE,
                columns::PL_RADEERR1,
                columns::PL_RADEERR2,
                max,
            ));
        }
        push_bounds(&mut preds, columns::PL_BMASSE, self.mass_min, self.mass_max);
        if let Some(max) = self.mass_err_max {
            preds.push(Predicate::relative_error(
                columns::PL_BMASSE,
                columns::PL_BMASSEERR1,
                columns::PL_BMASSEERR2,
                max,
            ));
        }
        push_bounds(
            &mut preds,
            columns::PL_DENS,
            self.density_min,
            self.density_max,
        );
        push_bounds(&mut preds, columns::PL_ORBECCEN, None, self.eccentricity_max);
        push_bounds(
            &mut preds,
            columns::PL_TRANDEP,
            self.transit_depth_min,
            self.transit_depth_max,
        );
        push_bounds(&mut preds, columns::PL_EQT, self.eqt_min, self.eqt_max);
        push_bounds(&mut preds, columns::PL_ORBPER, None, self.period_max);
        push_bounds(&mut preds, columns::PL_IMPPAR, None, self.impact_max);

        // -- System (inclusive bounds) --
        if let Some(min) = self.multiplicity_min {
            preds.push(Predicate::numeric(
                columns::SY_PNUM,
                Comparison::AtLeast(f64::from(min)),
            ));
        }
        if let Some(max) = self.multiplicity_max {
            preds.push(Predicate::numeric(
                columns::SY_PNUM,
                Comparison::AtMost(f64::from(max)),
            ));
        }

        preds
    }
}

/// Strict two-sided bounds share one shape: value present and `> min`,
/// `< max`.
fn push_bounds(
    preds: &mut Vec<Predicate>,
    field: &'static str,
    min: Option<f64>,
    max: Option<f64>,
) {
    if let Some(bound) = min {
        preds.push(Predicate::numeric(field, Comparison::GreaterThan(bound)));
    }
    if let Some(bound) = max {
        preds.push(Predicate::numeric(field, Comparison::LessThan(bound)));
    }
}

// ---------------------------------------------------------------------------
// Predicate descriptors: the enumerable unit the engine evaluates
// ---------------------------------------------------------------------------

/// One lowered predicate: which column it reads, how it compares, and which
/// columns must be non-null first.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Primary column the comparison reads.
    pub field: &'static str,
    pub comparison: Comparison,
    /// Columns that must be present and non-null before the comparison
    /// runs. A row failing this gate is excluded, never an error. Empty for
    /// prefix matching, where null degrades to the empty string instead.
    pub requires: Vec<&'static str>,
}

/// Comparison kinds. All threshold forms are strict except `AtLeast` /
/// `AtMost`, which exist solely for the multiplicity pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    GreaterThan(f64),
    LessThan(f64),
    AtLeast(f64),
    AtMost(f64),
    Equals(String),
    StartsWith(String),
    /// `max(|err_hi|, |err_lo|) / value < max` — the data-quality gate for
    /// asymmetric measurement uncertainties.
    RelativeErrorBelow {
        err_hi: &'static str,
        err_lo: &'static str,
        max: f64,
    },
    /// Fulton 2017 cut: `st_rad > host_radius_threshold(st_teff)`.
    AboveHostRadiusThreshold,
    /// Giant/dwarf branch on `st_rad / pl_rade` against the same threshold.
    HostBranchRatio(HostBranch),
}

impl Predicate {
    fn numeric(field: &'static str, comparison: Comparison) -> Self {
        Predicate {
            field,
            comparison,
            requires: vec![field],
        }
    }

    fn equals(field: &'static str, value: String) -> Self {
        Predicate {
            field,
            comparison: Comparison::Equals(value),
            requires: vec![field],
        }
    }

    fn relative_error(
        field: &'static str,
        err_hi: &'static str,
        err_lo: &'static str,
        max: f64,
    ) -> Self {
        Predicate {
            field,
            comparison: Comparison::RelativeErrorBelow { err_hi, err_lo, max },
            requires: vec![field, err_hi, err_lo],
        }
    }

    /// Whether a record passes this predicate.
    pub fn matches(&self, rec: &Record) -> bool {
        for col in &self.requires {
            match rec.get(col) {
                Some(v) if !v.is_null() => {}
                _ => return false,
            }
        }

        match &self.comparison {
            Comparison::GreaterThan(bound) => {
                rec.number(self.field).is_some_and(|v| v > *bound)
            }
            Comparison::LessThan(bound) => {
                rec.number(self.field).is_some_and(|v| v < *bound)
            }
            Comparison::AtLeast(bound) => {
                rec.number(self.field).is_some_and(|v| v >= *bound)
            }
            Comparison::AtMost(bound) => {
                rec.number(self.field).is_some_and(|v| v <= *bound)
            }
            Comparison::Equals(value) => rec.text(self.field) == Some(value.as_str()),
            Comparison::StartsWith(prefix) => {
                rec.text(self.field).unwrap_or("").starts_with(prefix.as_str())
            }
            Comparison::RelativeErrorBelow { err_hi, err_lo, max } => {
                let (Some(value), Some(hi), Some(lo)) = (
                    rec.number(self.field),
                    rec.number(err_hi),
                    rec.number(err_lo),
                ) else {
                    return false;
                };
                hi.abs().max(lo.abs()) / value < *max
            }
            Comparison::AboveHostRadiusThreshold => {
                let (Some(teff), Some(st_rad)) = (
                    rec.number(columns::ST_TEFF),
                    rec.number(columns::ST_RAD),
                ) else {
                    return false;
                };
                st_rad > host_radius_threshold(teff)
            }
            Comparison::HostBranchRatio(branch) => {
                let (Some(teff), Some(st_rad), Some(pl_rade)) = (
                    rec.number(columns::ST_TEFF),
                    rec.number(columns::ST_RAD),
                    rec.number(columns::PL_RADE),
                ) else {
                    return false;
                };
                let ratio = st_rad / pl_rade;
                let threshold = host_radius_threshold(teff);
                match branch {
                    HostBranch::Giant => ratio <= threshold,
                    HostBranch::Dwarf => ratio > threshold,
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Filter engine: conjunction of the active predicates
// ---------------------------------------------------------------------------

/// Return indices of records that pass every active criterion.
///
/// Pure and stateless: the same catalog and criteria always produce the
/// same indices, in source row order. Predicates are independent boolean
/// masks, so the result is invariant to their application order.
pub fn filtered_indices(catalog: &Catalog, criteria: &Criteria) -> Vec<usize> {
    let predicates = criteria.predicates();
    if predicates.is_empty() {
        return (0..catalog.len()).collect();
    }

    let indices: Vec<usize> = catalog
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| predicates.iter().all(|p| p.matches(rec)))
        .map(|(i, _)| i)
        .collect();

    log::debug!(
        "{} of {} records pass {} predicates",
        indices.len(),
        catalog.len(),
        predicates.len()
    );
    indices
}

/// Apply the criteria and return the surviving subset as a new catalog.
///
/// The input is never mutated; row order is preserved; an all-default
/// `Criteria` returns a copy of the input unchanged. A min above its max
/// quietly yields an empty catalog.
pub fn apply_filters(catalog: &Catalog, criteria: &Criteria) -> Catalog {
    let records = filtered_indices(catalog, criteria)
        .into_iter()
        .map(|i| catalog.records[i].clone())
        .collect();
    Catalog::from_records(records)
}
