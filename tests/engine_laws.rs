//! Algebraic laws of the filter engine, checked end to end on a small
//! hand-built catalog: identity, order-invariance, monotonicity, and
//! null-safety, plus preset resolution and criteria serialization.

use exosift::{apply_filters, columns, Catalog, CatalogValue, Criteria, Record};

fn planet(pairs: &[(&str, CatalogValue)]) -> Record {
    let mut rec = Record::default();
    for (col, val) in pairs {
        rec.set(*col, val.clone());
    }
    rec
}

fn f(v: f64) -> CatalogValue {
    CatalogValue::Float(v)
}

fn t(s: &str) -> CatalogValue {
    CatalogValue::Text(s.to_string())
}

/// A small mixed catalog: M dwarfs and G dwarfs, some rows with holes.
fn sample_catalog() -> Catalog {
    Catalog::from_records(vec![
        planet(&[
            (columns::DISC_FACILITY, t("Kepler")),
            (columns::ST_SPECTYPE, t("M4 V")),
            (columns::ST_TEFF, f(3100.0)),
            (columns::PL_RADE, f(1.1)),
            (columns::PL_RADEERR1, f(0.05)),
            (columns::PL_RADEERR2, f(-0.04)),
            (columns::PL_BMASSE, f(1.4)),
            (columns::DISC_YEAR, CatalogValue::Integer(2014)),
        ]),
        planet(&[
            (columns::DISC_FACILITY, t("Kepler")),
            (columns::ST_SPECTYPE, t("G2 V")),
            (columns::ST_TEFF, f(5700.0)),
            (columns::PL_RADE, f(2.4)),
            (columns::PL_BMASSE, f(6.0)),
            (columns::DISC_YEAR, CatalogValue::Integer(2011)),
        ]),
        planet(&[
            (columns::DISC_FACILITY, t("K2")),
            (columns::ST_SPECTYPE, t("M2.5 V")),
            (columns::ST_TEFF, f(3400.0)),
            (columns::PL_RADE, f(3.8)),
            (columns::DISC_YEAR, CatalogValue::Integer(2016)),
        ]),
        planet(&[
            // spectral type and radius missing entirely
            (columns::DISC_FACILITY, t("Transiting Exoplanet Survey Satellite (TESS)")),
            (columns::ST_TEFF, f(4900.0)),
            (columns::DISC_YEAR, CatalogValue::Integer(2019)),
        ]),
        planet(&[
            (columns::DISC_FACILITY, CatalogValue::Null),
            (columns::ST_SPECTYPE, t("M5 V")),
            (columns::ST_TEFF, f(2900.0)),
            (columns::PL_RADE, f(4.4)),
            (columns::DISC_YEAR, CatalogValue::Integer(2021)),
        ]),
    ])
}

fn same_rows(a: &Catalog, b: &Catalog) -> bool {
    a.len() == b.len()
        && a.records
            .iter()
            .zip(b.records.iter())
            .all(|(x, y)| x.values == y.values)
}

#[test]
fn empty_criteria_is_the_identity() {
    let catalog = sample_catalog();
    let out = apply_filters(&catalog, &Criteria::default());
    assert!(same_rows(&catalog, &out));
}

#[test]
fn filters_commute_and_compose() {
    let catalog = sample_catalog();
    let by_type = Criteria {
        spectral_prefix: Some("M".into()),
        ..Criteria::default()
    };
    let by_radius = Criteria {
        radius_max: Some(4.0),
        ..Criteria::default()
    };
    let both = Criteria {
        spectral_prefix: Some("M".into()),
        radius_max: Some(4.0),
        ..Criteria::default()
    };

    let type_then_radius = apply_filters(&apply_filters(&catalog, &by_type), &by_radius);
    let radius_then_type = apply_filters(&apply_filters(&catalog, &by_radius), &by_type);
    let combined = apply_filters(&catalog, &both);

    assert!(same_rows(&type_then_radius, &radius_then_type));
    assert!(same_rows(&type_then_radius, &combined));
    assert_eq!(combined.len(), 2); // the two M dwarfs with radius below 4
}

#[test]
fn adding_criteria_never_adds_rows() {
    let catalog = sample_catalog();
    let mut criteria = Criteria::default();
    let mut previous = catalog.len();

    criteria.spectral_prefix = Some("M".into());
    let after_type = apply_filters(&catalog, &criteria).len();
    assert!(after_type <= previous);
    previous = after_type;

    criteria.radius_max = Some(4.0);
    let after_radius = apply_filters(&catalog, &criteria).len();
    assert!(after_radius <= previous);
    previous = after_radius;

    criteria.year_max = Some(2015);
    let after_year = apply_filters(&catalog, &criteria).len();
    assert!(after_year <= previous);
}

#[test]
fn nulls_are_excluded_not_errors() {
    let catalog = sample_catalog();

    // Row 3 has no spectral type at all; row 4 has a null facility.
    let m_dwarfs = apply_filters(
        &catalog,
        &Criteria {
            spectral_prefix: Some("M".into()),
            ..Criteria::default()
        },
    );
    assert_eq!(m_dwarfs.len(), 3);

    let kepler = apply_filters(
        &catalog,
        &Criteria {
            mission: Some("Kepler".into()),
            ..Criteria::default()
        },
    );
    assert_eq!(kepler.len(), 2);

    // A bound on a column some rows lack silently drops those rows.
    let small = apply_filters(
        &catalog,
        &Criteria {
            radius_max: Some(100.0),
            ..Criteria::default()
        },
    );
    assert_eq!(small.len(), 4);
}

#[test]
fn filtering_does_not_mutate_the_input() {
    let catalog = sample_catalog();
    let before: Vec<_> = catalog.records.iter().map(|r| r.values.clone()).collect();

    let _ = apply_filters(
        &catalog,
        &Criteria {
            radius_max: Some(2.0),
            mission: Some("Kepler".into()),
            ..Criteria::default()
        },
    );

    let after: Vec<_> = catalog.records.iter().map(|r| r.values.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn strict_upper_bound_excludes_the_boundary() {
    let catalog = Catalog::from_records(
        [1.0, 3.9, 4.0, 4.1]
            .iter()
            .map(|&r| planet(&[(columns::PL_RADE, f(r))]))
            .collect(),
    );
    let out = apply_filters(
        &catalog,
        &Criteria {
            radius_max: Some(4.0),
            ..Criteria::default()
        },
    );
    assert_eq!(out.len(), 2);
}

#[test]
fn luque_paille_style_quality_gate() {
    // Radius known to 4% passes the 8% gate; 12% does not.
    let catalog = Catalog::from_records(vec![
        planet(&[
            (columns::ST_SPECTYPE, t("M3 V")),
            (columns::PL_RADE, f(2.5)),
            (columns::PL_RADEERR1, f(0.1)),
            (columns::PL_RADEERR2, f(-0.08)),
            (columns::PL_BMASSE, f(6.0)),
            (columns::PL_BMASSEERR1, f(0.9)),
            (columns::PL_BMASSEERR2, f(-0.8)),
            (columns::DISC_YEAR, CatalogValue::Integer(2019)),
        ]),
        planet(&[
            (columns::ST_SPECTYPE, t("M1 V")),
            (columns::PL_RADE, f(2.5)),
            (columns::PL_RADEERR1, f(0.3)),
            (columns::PL_RADEERR2, f(-0.2)),
            (columns::PL_BMASSE, f(6.0)),
            (columns::PL_BMASSEERR1, f(0.9)),
            (columns::PL_BMASSEERR2, f(-0.8)),
            (columns::DISC_YEAR, CatalogValue::Integer(2019)),
        ]),
    ]);

    let criteria = exosift::presets::preset_criteria("Luque_Paille_2022").unwrap();
    let out = apply_filters(&catalog, &criteria);
    assert_eq!(out.len(), 1);
    assert_eq!(out.records[0].number(columns::PL_RADEERR1), Some(0.1));
}

#[test]
fn criteria_round_trip_through_json() {
    let criteria = Criteria {
        mission: Some("Kepler".into()),
        teff_min: Some(4700.0),
        teff_max: Some(6500.0),
        fulton_2017: true,
        multiplicity_min: Some(2),
        ..Criteria::default()
    };
    let text = serde_json::to_string(&criteria).unwrap();
    let parsed = Criteria::from_json(&text).unwrap();
    assert_eq!(criteria, parsed);
}

#[test]
fn presets_resolve_by_name() {
    for name in ["M", "Kepler", "TESS", "Fulton_2017", "Luque_Paille_2022"] {
        assert!(
            exosift::presets::find_preset(name).is_some(),
            "missing preset {name}"
        );
    }
    assert!(exosift::presets::find_preset("Voyager").is_none());
}
