//! Reference mass-radius curves from planetary-interior models.
//!
//! Each curve is a static lookup table of (mass, radius) pairs in Earth
//! units, sampled from the Zeng et al. power-law relations
//! (R ∝ M^0.27 for rocky interiors, R ∝ M^0.25 for iron). Overlays use
//! [`MassRadiusCurve::radius_at`] — one generic interpolation routine
//! instead of per-plot constant arrays.

/// A tabulated interior-model curve: (mass M⊕, radius R⊕) pairs with
/// strictly increasing mass.
#[derive(Debug, Clone, Copy)]
pub struct MassRadiusCurve {
    pub name: &'static str,
    pub points: &'static [(f64, f64)],
}

/// Pure-iron planet, R = 0.78 · M^0.25.
pub const IRON: MassRadiusCurve = MassRadiusCurve {
    name: "pure iron",
    points: &[
        (0.5, 0.656),
        (1.0, 0.780),
        (2.0, 0.927),
        (4.0, 1.103),
        (8.0, 1.312),
        (16.0, 1.560),
        (32.0, 1.855),
    ],
};

/// Earth-like rocky planet (32.5% Fe, 67.5% silicate), R = M^0.27.
pub const EARTH_LIKE: MassRadiusCurve = MassRadiusCurve {
    name: "Earth-like rocky",
    points: &[
        (0.5, 0.829),
        (1.0, 1.000),
        (2.0, 1.206),
        (4.0, 1.454),
        (8.0, 1.753),
        (16.0, 2.114),
        (32.0, 2.549),
    ],
};

/// 100% water world, R = 1.24 · M^0.27.
pub const PURE_WATER: MassRadiusCurve = MassRadiusCurve {
    name: "pure water",
    points: &[
        (0.5, 1.028),
        (1.0, 1.240),
        (2.0, 1.495),
        (4.0, 1.803),
        (8.0, 2.174),
        (16.0, 2.621),
        (32.0, 3.161),
    ],
};

/// The overlay set, densest composition first.
pub const REFERENCE_CURVES: [MassRadiusCurve; 3] = [IRON, EARTH_LIKE, PURE_WATER];

impl MassRadiusCurve {
    /// Interpolated radius at the given mass, piecewise-linear between
    /// table points. `None` outside the tabulated mass range — overlays
    /// should stop at the table edge rather than extrapolate.
    pub fn radius_at(&self, mass: f64) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if mass < first.0 || mass > last.0 {
            return None;
        }

        for window in self.points.windows(2) {
            let (m0, r0) = window[0];
            let (m1, r1) = window[1];
            if mass <= m1 {
                let t = (mass - m0) / (m1 - m0);
                return Some(r0 + t * (r1 - r0));
            }
        }
        Some(last.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_points_are_returned_exactly() {
        assert_eq!(EARTH_LIKE.radius_at(1.0), Some(1.0));
        assert_eq!(IRON.radius_at(1.0), Some(0.78));
        assert_eq!(PURE_WATER.radius_at(32.0), Some(3.161));
    }

    #[test]
    fn interpolation_stays_between_neighbors() {
        let r = EARTH_LIKE.radius_at(3.0).unwrap();
        assert!(r > 1.206 && r < 1.454);
        // linear midpoint of the (2, 4) segment
        assert!((r - (1.206 + 1.454) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn outside_the_table_is_none() {
        assert_eq!(EARTH_LIKE.radius_at(0.1), None);
        assert_eq!(EARTH_LIKE.radius_at(100.0), None);
    }

    #[test]
    fn curves_are_monotonic_in_mass() {
        for curve in REFERENCE_CURVES {
            for window in curve.points.windows(2) {
                assert!(window[0].0 < window[1].0, "{} mass order", curve.name);
                assert!(window[0].1 < window[1].1, "{} radius order", curve.name);
            }
        }
    }

    #[test]
    fn water_lies_above_rock_above_iron() {
        for mass in [0.5, 1.0, 5.0, 20.0] {
            let iron = IRON.radius_at(mass).unwrap();
            let rock = EARTH_LIKE.radius_at(mass).unwrap();
            let water = PURE_WATER.radius_at(mass).unwrap();
            assert!(iron < rock && rock < water);
        }
    }
}
