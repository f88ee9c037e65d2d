use serde::{Deserialize, Serialize};

use crate::data::filter::{Criteria, CriteriaError};

// ---------------------------------------------------------------------------
// Preset: a named, fixed criteria set
// ---------------------------------------------------------------------------

/// A named criteria set reproducing a mission selection, a stellar-type cut,
/// or a published paper's sample definition.
///
/// Presets are pure data: resolve one, then pass its criteria to
/// [`apply_filters`](crate::apply_filters) with whichever catalog the caller
/// has loaded. Nothing here holds a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub criteria: Criteria,
}

impl Preset {
    fn new(name: &str, criteria: Criteria) -> Self {
        Preset {
            name: name.to_string(),
            criteria,
        }
    }
}

// ---------------------------------------------------------------------------
// Stellar-type presets
// ---------------------------------------------------------------------------

/// One preset per spectral class prefix, O through T.
pub fn stellar_type_presets() -> Vec<Preset> {
    ["O", "B", "A", "F", "G", "K", "M", "L", "T"]
        .iter()
        .map(|class| {
            Preset::new(
                class,
                Criteria {
                    spectral_prefix: Some((*class).to_string()),
                    ..Criteria::default()
                },
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Mission presets
// ---------------------------------------------------------------------------

/// Short mission name → the catalog's exact `disc_facility` string.
const MISSION_FACILITIES: [(&str, &str); 10] = [
    ("Kepler", "Kepler"),
    ("K2", "K2"),
    ("TESS", "Transiting Exoplanet Survey Satellite (TESS)"),
    ("CoRoT", "CoRoT"),
    ("CHEOPS", "CHaracterising ExOPlanets Satellite (CHEOPS)"),
    ("JWST", "James Webb Space Telescope (JWST)"),
    ("Spitzer", "Spitzer Space Telescope"),
    ("Hubble", "Hubble Space Telescope"),
    ("Gaia", "European Space Agency (ESA) Gaia Satellite"),
    ("WISE", "Wide-field Infrared Survey Explorer (WISE) Sat"),
];

/// One preset per discovery facility.
pub fn mission_presets() -> Vec<Preset> {
    MISSION_FACILITIES
        .iter()
        .map(|(name, facility)| {
            Preset::new(
                name,
                Criteria {
                    mission: Some((*facility).to_string()),
                    ..Criteria::default()
                },
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Paper presets
// ---------------------------------------------------------------------------

/// Published sample definitions, reproduced cut for cut.
pub fn paper_presets() -> Vec<Preset> {
    vec![
        // Fulton et al. 2017: the California-Kepler Survey radius-gap
        // sample. Bright, quiet FGK dwarfs observed by Kepler before 2017.
        Preset::new(
            "Fulton_2017",
            Criteria {
                mission: Some("Kepler".to_string()),
                year_max: Some(2017),
                kp_max: Some(14.2),
                teff_min: Some(4700.0),
                teff_max: Some(6500.0),
                fulton_2017: true,
                impact_max: Some(0.7),
                ..Criteria::default()
            },
        ),
        // Luque & Pallé 2022: well-characterized small planets around
        // M dwarfs (radius and mass to 8% / 25%).
        Preset::new(
            "Luque_Paille_2022",
            Criteria {
                year_max: Some(2022),
                spectral_prefix: Some("M".to_string()),
                radius_max: Some(4.0),
                radius_err_max: Some(0.08),
                mass_max: Some(20.0),
                mass_err_max: Some(0.25),
                ..Criteria::default()
            },
        ),
    ]
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Every registry combined, in registry order.
pub fn all_presets() -> Vec<Preset> {
    let mut presets = stellar_type_presets();
    presets.extend(mission_presets());
    presets.extend(paper_presets());
    presets
}

/// Find a preset by its registry name.
pub fn find_preset(name: &str) -> Option<Preset> {
    all_presets().into_iter().find(|p| p.name == name)
}

/// Resolve a preset name to its criteria, or a typed error for a name
/// nothing registers.
pub fn preset_criteria(name: &str) -> Result<Criteria, CriteriaError> {
    find_preset(name)
        .map(|p| p.criteria)
        .ok_or_else(|| CriteriaError::UnknownPreset(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registries_have_expected_sizes() {
        assert_eq!(stellar_type_presets().len(), 9);
        assert_eq!(mission_presets().len(), 10);
        assert_eq!(paper_presets().len(), 2);
        assert_eq!(all_presets().len(), 21);
    }

    #[test]
    fn mission_presets_carry_full_facility_strings() {
        let tess = find_preset("TESS").unwrap();
        assert_eq!(
            tess.criteria.mission.as_deref(),
            Some("Transiting Exoplanet Survey Satellite (TESS)")
        );
        let kepler = find_preset("Kepler").unwrap();
        assert_eq!(kepler.criteria.mission.as_deref(), Some("Kepler"));
    }

    #[test]
    fn fulton_2017_reproduces_the_paper_cuts() {
        let criteria = preset_criteria("Fulton_2017").unwrap();
        assert_eq!(criteria.mission.as_deref(), Some("Kepler"));
        assert_eq!(criteria.year_max, Some(2017));
        assert_eq!(criteria.kp_max, Some(14.2));
        assert_eq!(criteria.teff_min, Some(4700.0));
        assert_eq!(criteria.teff_max, Some(6500.0));
        assert!(criteria.fulton_2017);
        assert_eq!(criteria.impact_max, Some(0.7));
    }

    #[test]
    fn luque_paille_2022_reproduces_the_paper_cuts() {
        let criteria = preset_criteria("Luque_Paille_2022").unwrap();
        assert_eq!(criteria.year_max, Some(2022));
        assert_eq!(criteria.spectral_prefix.as_deref(), Some("M"));
        assert_eq!(criteria.radius_max, Some(4.0));
        assert_eq!(criteria.radius_err_max, Some(0.08));
        assert_eq!(criteria.mass_max, Some(20.0));
        assert_eq!(criteria.mass_err_max, Some(0.25));
    }

    #[test]
    fn unknown_preset_is_a_typed_error() {
        assert!(matches!(
            preset_criteria("Hipparcos"),
            Err(CriteriaError::UnknownPreset(name)) if name == "Hipparcos"
        ));
    }
}
