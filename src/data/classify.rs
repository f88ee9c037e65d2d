use serde::{Deserialize, Serialize};
use std::fmt;

use super::model::{columns, Catalog, CatalogValue};

// ---------------------------------------------------------------------------
// Temperature-dependent host-star discriminator
// ---------------------------------------------------------------------------

/// Slope of the radius cut in the log10(R) – Teff plane (Fulton et al. 2017).
const THRESHOLD_SLOPE: f64 = 0.00025;
/// Offset of the radius cut, log10 of solar radii.
const THRESHOLD_OFFSET: f64 = 0.20;

/// Per-row stellar radius threshold separating evolved (giant) hosts from
/// main-sequence (dwarf) hosts:
///
/// ```text
/// threshold = 10^( 0.00025 · Teff / (1 − 5500) + 0.20 )
/// ```
///
/// The `(1 − 5500)` denominator is the published cut's convention and is
/// reproduced verbatim; it makes the slope term negative for positive Teff.
/// Callers reproducing other selections should not substitute a
/// `(Teff − 5500)` form — boundary stars would move between branches.
pub fn host_radius_threshold(teff: f64) -> f64 {
    10f64.powf(THRESHOLD_SLOPE * (teff / (1.0 - 5500.0)) + THRESHOLD_OFFSET)
}

/// Which side of the temperature-dependent radius cut a host star falls on,
/// judged by the ratio `st_rad / pl_rade`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostBranch {
    /// Evolved host: ratio at or below the threshold.
    Giant,
    /// Main-sequence host: ratio above the threshold.
    Dwarf,
}

// ---------------------------------------------------------------------------
// Rocky / water-world / sub-Neptune composition classifier
// ---------------------------------------------------------------------------

/// Earth bulk density in g/cm³ — the normalization used throughout.
pub const EARTH_DENSITY: f64 = 4.79;
/// Bulk density of a pure-water planet in g/cm³ (Luque & Pallé 2022).
pub const WATER_DENSITY: f64 = 2.11;
/// Mass ceiling for the water-world branch, in Earth masses.
const WATER_WORLD_MAX_MASS: f64 = 6.0;

/// Composition class assigned by the two-threshold decision tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Composition {
    Rocky,
    WaterWorld,
    SubNeptune,
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Composition::Rocky => write!(f, "rocky"),
            Composition::WaterWorld => write!(f, "water-world"),
            Composition::SubNeptune => write!(f, "sub-Neptune"),
        }
    }
}

/// Planet bulk density divided by Earth's.
pub fn density_ratio(density: f64) -> f64 {
    density / EARTH_DENSITY
}

/// Classify a planet from its mass (Earth masses) and bulk density (g/cm³).
///
/// Rocky when the density ratio reaches the midpoint between the Earth and
/// pure-water lines; otherwise water-world up to 6 Earth masses, sub-Neptune
/// beyond. A fixed decision tree, not a fitted model — the density check
/// takes precedence over the mass check.
pub fn classify_planet(mass_earth: f64, density: f64) -> Composition {
    let ratio = density_ratio(density);
    let water_ratio = WATER_DENSITY / EARTH_DENSITY;
    let midpoint = (1.0 + water_ratio) / 2.0;

    if ratio >= midpoint {
        Composition::Rocky
    } else if mass_earth <= WATER_WORLD_MAX_MASS {
        Composition::WaterWorld
    } else {
        Composition::SubNeptune
    }
}

/// Return a copy of the catalog with two ephemeral columns appended:
/// `density_ratio` and `composition`.
///
/// Rows missing mass or density get `Null` in both. The input catalog is not
/// modified; the two columns are not part of the persistent schema and exist
/// only on the returned copy.
pub fn with_composition(catalog: &Catalog) -> Catalog {
    let records = catalog
        .records
        .iter()
        .map(|rec| {
            let mut out = rec.clone();
            match (
                rec.number(columns::PL_BMASSE),
                rec.number(columns::PL_DENS),
            ) {
                (Some(mass), Some(density)) => {
                    out.set(
                        columns::DENSITY_RATIO,
                        CatalogValue::Float(density_ratio(density)),
                    );
                    out.set(
                        columns::COMPOSITION,
                        CatalogValue::Text(classify_planet(mass, density).to_string()),
                    );
                }
                _ => {
                    out.set(columns::DENSITY_RATIO, CatalogValue::Null);
                    out.set(columns::COMPOSITION, CatalogValue::Null);
                }
            }
            out
        })
        .collect();

    log::debug!("annotated {} records with composition columns", catalog.len());
    Catalog::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    #[test]
    fn threshold_at_solar_temperature() {
        // 10^(0.00025 · (5500 / −5499) + 0.20) ≈ 1.584
        let t = host_radius_threshold(5500.0);
        assert!((t - 1.584).abs() < 1e-3, "got {t}");
    }

    #[test]
    fn threshold_is_nearly_flat_in_teff() {
        // The slope term is tiny; the cut stays close to 10^0.2 solar radii
        // across the FGK range.
        let cool = host_radius_threshold(4700.0);
        let hot = host_radius_threshold(6500.0);
        assert!((cool - hot).abs() < 0.01);
        assert!(cool > 1.5 && cool < 1.6);
    }

    #[test]
    fn dense_planet_is_rocky_regardless_of_mass() {
        // density ratio 0.9 clears the midpoint (≈ 0.72)
        assert_eq!(
            classify_planet(4.0, 0.9 * EARTH_DENSITY),
            Composition::Rocky
        );
    }

    #[test]
    fn light_low_density_planet_is_water_world() {
        assert_eq!(
            classify_planet(4.0, 0.3 * EARTH_DENSITY),
            Composition::WaterWorld
        );
    }

    #[test]
    fn heavy_low_density_planet_is_sub_neptune() {
        assert_eq!(
            classify_planet(8.0, 0.3 * EARTH_DENSITY),
            Composition::SubNeptune
        );
    }

    #[test]
    fn midpoint_is_inclusive() {
        let water_ratio = WATER_DENSITY / EARTH_DENSITY;
        let midpoint = (1.0 + water_ratio) / 2.0;
        assert_eq!(
            classify_planet(10.0, midpoint * EARTH_DENSITY),
            Composition::Rocky
        );
    }

    #[test]
    fn water_world_mass_cutoff_is_inclusive() {
        assert_eq!(
            classify_planet(6.0, 0.3 * EARTH_DENSITY),
            Composition::WaterWorld
        );
    }

    #[test]
    fn composition_labels() {
        assert_eq!(Composition::Rocky.to_string(), "rocky");
        assert_eq!(Composition::WaterWorld.to_string(), "water-world");
        assert_eq!(Composition::SubNeptune.to_string(), "sub-Neptune");
    }

    #[test]
    fn annotation_adds_ephemeral_columns() {
        let mut complete = Record::default();
        complete.set(columns::PL_BMASSE, CatalogValue::Float(4.0));
        complete.set(columns::PL_DENS, CatalogValue::Float(0.9 * EARTH_DENSITY));

        let mut partial = Record::default();
        partial.set(columns::PL_BMASSE, CatalogValue::Float(4.0));

        let catalog = Catalog::from_records(vec![complete, partial]);
        let annotated = with_composition(&catalog);

        assert_eq!(annotated.len(), 2);
        assert_eq!(
            annotated.records[0].text(columns::COMPOSITION),
            Some("rocky")
        );
        let ratio = annotated.records[0].number(columns::DENSITY_RATIO).unwrap();
        assert!((ratio - 0.9).abs() < 1e-12);

        assert_eq!(
            annotated.records[1].get(columns::COMPOSITION),
            Some(&CatalogValue::Null)
        );

        // Input catalog untouched: no ephemeral columns on the original.
        assert!(catalog.records[0].get(columns::COMPOSITION).is_none());
    }
}
