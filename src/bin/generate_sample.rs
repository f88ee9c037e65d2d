use std::io::Write as _;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform draw in [lo, hi)
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One synthetic confirmed planet, pre-column-ization.
struct SyntheticPlanet {
    pl_name: String,
    disc_facility: String,
    discoverymethod: String,
    disc_year: i64,
    sy_kepmag: Option<f64>,
    st_spectype: Option<String>,
    st_teff: Option<f64>,
    st_rad: Option<f64>,
    st_raderr1: Option<f64>,
    st_raderr2: Option<f64>,
    st_met: Option<f64>,
    st_age: Option<f64>,
    pl_rade: Option<f64>,
    pl_radeerr1: Option<f64>,
    pl_radeerr2: Option<f64>,
    pl_bmasse: Option<f64>,
    pl_bmasseerr1: Option<f64>,
    pl_bmasseerr2: Option<f64>,
    pl_dens: Option<f64>,
    pl_orbeccen: Option<f64>,
    pl_trandep: Option<f64>,
    pl_eqt: Option<f64>,
    pl_orbper: Option<f64>,
    pl_imppar: Option<f64>,
    sy_pnum: i64,
}

fn synthesize(n: usize, rng: &mut SimpleRng) -> Vec<SyntheticPlanet> {
    // Spectral class → (Teff range, dwarf radius range)
    let classes: [(&str, (f64, f64), (f64, f64)); 4] = [
        ("F", (6000.0, 7200.0), (1.1, 1.5)),
        ("G", (5300.0, 6000.0), (0.8, 1.1)),
        ("K", (3900.0, 5300.0), (0.6, 0.8)),
        ("M", (2400.0, 3900.0), (0.1, 0.6)),
    ];
    let facilities = [
        "Kepler",
        "Kepler",
        "Kepler",
        "Transiting Exoplanet Survey Satellite (TESS)",
        "Transiting Exoplanet Survey Satellite (TESS)",
        "K2",
        "CoRoT",
        "W. M. Keck Observatory",
    ];

    (0..n)
        .map(|i| {
            let (class, teff_range, rad_range) = rng.pick(&classes);
            let teff = rng.uniform(teff_range.0, teff_range.1);

            // ~8% evolved hosts with inflated radii
            let giant = rng.next_f64() < 0.08;
            let st_rad = if giant {
                rng.uniform(2.0, 10.0)
            } else {
                rng.uniform(rad_range.0, rad_range.1)
            };
            let st_raderr = st_rad * rng.uniform(0.02, 0.12);

            let subtype = (rng.next_u64() % 10) as usize;
            let st_spectype = if rng.next_f64() < 0.1 {
                None
            } else {
                Some(format!("{class}{subtype} V"))
            };

            let pl_rade = rng.gauss(0.6, 0.8).exp().clamp(0.3, 20.0);
            let pl_radeerr = pl_rade * rng.uniform(0.02, 0.2);

            // Rough mass-radius scaling with scatter, then bulk density.
            let pl_bmasse =
                (pl_rade.powf(2.06) * rng.uniform(0.6, 1.6)).clamp(0.1, 4000.0);
            let pl_dens = 5.51 * pl_bmasse / pl_rade.powi(3);
            let have_mass = rng.next_f64() < 0.7;

            let facility = rng.pick(&facilities);
            let discoverymethod = if rng.next_f64() < 0.85 {
                "Transit"
            } else {
                "Radial Velocity"
            };

            SyntheticPlanet {
                pl_name: format!("EXS-{} b", i + 1),
                disc_facility: facility.to_string(),
                discoverymethod: discoverymethod.to_string(),
                disc_year: 2009 + (rng.next_u64() % 17) as i64,
                sy_kepmag: Some(rng.uniform(8.0, 16.0)),
                st_spectype,
                st_teff: Some(teff),
                st_rad: Some(st_rad),
                st_raderr1: Some(st_raderr),
                st_raderr2: Some(-st_raderr * rng.uniform(0.8, 1.2)),
                st_met: Some(rng.gauss(0.0, 0.2)),
                st_age: if rng.next_f64() < 0.5 {
                    Some(rng.uniform(0.5, 12.0))
                } else {
                    None
                },
                pl_rade: Some(pl_rade),
                pl_radeerr1: Some(pl_radeerr),
                pl_radeerr2: Some(-pl_radeerr * rng.uniform(0.8, 1.2)),
                pl_bmasse: have_mass.then_some(pl_bmasse),
                pl_bmasseerr1: have_mass.then(|| pl_bmasse * rng.uniform(0.05, 0.3)),
                pl_bmasseerr2: have_mass.then(|| -pl_bmasse * rng.uniform(0.05, 0.3)),
                pl_dens: have_mass.then_some(pl_dens),
                pl_orbeccen: Some(rng.uniform(0.0, 0.4)),
                pl_trandep: Some(rng.uniform(0.001, 3.0)),
                pl_eqt: Some(rng.uniform(150.0, 2200.0)),
                pl_orbper: Some(10f64.powf(rng.uniform(0.0, 2.5))),
                pl_imppar: Some(rng.uniform(0.0, 1.0)),
                sy_pnum: 1 + (rng.next_u64() % 5) as i64,
            }
        })
        .collect()
}

const COLUMNS: [&str; 25] = [
    "pl_name",
    "disc_facility",
    "discoverymethod",
    "disc_year",
    "sy_kepmag",
    "st_spectype",
    "st_teff",
    "st_rad",
    "st_raderr1",
    "st_raderr2",
    "st_met",
    "st_age",
    "pl_rade",
    "pl_radeerr1",
    "pl_radeerr2",
    "pl_bmasse",
    "pl_bmasseerr1",
    "pl_bmasseerr2",
    "pl_dens",
    "pl_orbeccen",
    "pl_trandep",
    "pl_eqt",
    "pl_orbper",
    "pl_imppar",
    "sy_pnum",
];

fn to_record_batch(planets: &[SyntheticPlanet]) -> RecordBatch {
    fn float_col(planets: &[SyntheticPlanet], get: impl Fn(&SyntheticPlanet) -> Option<f64>) -> ArrayRef {
        Arc::new(Float64Array::from(
            planets.iter().map(&get).collect::<Vec<_>>(),
        ))
    }

    let fields: Vec<Field> = COLUMNS
        .iter()
        .map(|name| {
            let dtype = match *name {
                "pl_name" | "disc_facility" | "discoverymethod" | "st_spectype" => DataType::Utf8,
                "disc_year" | "sy_pnum" => DataType::Int64,
                _ => DataType::Float64,
            };
            Field::new(*name, dtype, true)
        })
        .collect();

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            planets.iter().map(|p| Some(p.pl_name.clone())).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            planets.iter().map(|p| Some(p.disc_facility.clone())).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            planets.iter().map(|p| Some(p.discoverymethod.clone())).collect::<Vec<_>>(),
        )),
        Arc::new(Int64Array::from(
            planets.iter().map(|p| Some(p.disc_year)).collect::<Vec<_>>(),
        )),
        float_col(planets, |p| p.sy_kepmag),
        Arc::new(StringArray::from(
            planets.iter().map(|p| p.st_spectype.clone()).collect::<Vec<_>>(),
        )),
        float_col(planets, |p| p.st_teff),
        float_col(planets, |p| p.st_rad),
        float_col(planets, |p| p.st_raderr1),
        float_col(planets, |p| p.st_raderr2),
        float_col(planets, |p| p.st_met),
        float_col(planets, |p| p.st_age),
        float_col(planets, |p| p.pl_rade),
        float_col(planets, |p| p.pl_radeerr1),
        float_col(planets, |p| p.pl_radeerr2),
        float_col(planets, |p| p.pl_bmasse),
        float_col(planets, |p| p.pl_bmasseerr1),
        float_col(planets, |p| p.pl_bmasseerr2),
        float_col(planets, |p| p.pl_dens),
        float_col(planets, |p| p.pl_orbeccen),
        float_col(planets, |p| p.pl_trandep),
        float_col(planets, |p| p.pl_eqt),
        float_col(planets, |p| p.pl_orbper),
        float_col(planets, |p| p.pl_imppar),
        Arc::new(Int64Array::from(
            planets.iter().map(|p| Some(p.sy_pnum)).collect::<Vec<_>>(),
        )),
    ];

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
        .expect("Failed to create RecordBatch")
}

fn write_csv(planets: &[SyntheticPlanet], path: &str) {
    let mut file = std::fs::File::create(path).expect("Failed to create CSV file");
    // Archive-style comment preamble, so the loader's comment handling is
    // exercised by the sample.
    writeln!(file, "# Synthetic confirmed-planet sample").expect("write");
    writeln!(file, "# One row per planet; empty cells are missing values").expect("write");

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(COLUMNS).expect("write header");

    let fmt = |v: Option<f64>| v.map(|v| format!("{v:.6}")).unwrap_or_default();
    for p in planets {
        let row = [
            p.pl_name.clone(),
            p.disc_facility.clone(),
            p.discoverymethod.clone(),
            p.disc_year.to_string(),
            fmt(p.sy_kepmag),
            p.st_spectype.clone().unwrap_or_default(),
            fmt(p.st_teff),
            fmt(p.st_rad),
            fmt(p.st_raderr1),
            fmt(p.st_raderr2),
            fmt(p.st_met),
            fmt(p.st_age),
            fmt(p.pl_rade),
            fmt(p.pl_radeerr1),
            fmt(p.pl_radeerr2),
            fmt(p.pl_bmasse),
            fmt(p.pl_bmasseerr1),
            fmt(p.pl_bmasseerr2),
            fmt(p.pl_dens),
            fmt(p.pl_orbeccen),
            fmt(p.pl_trandep),
            fmt(p.pl_eqt),
            fmt(p.pl_orbper),
            fmt(p.pl_imppar),
            p.sy_pnum.to_string(),
        ];
        writer.write_record(&row).expect("write row");
    }
    writer.flush().expect("flush CSV");
}

fn main() {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let planets = synthesize(240, &mut rng);

    let batch = to_record_batch(&planets);
    let parquet_path = "sample_catalog.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    let csv_path = "sample_catalog.csv";
    write_csv(&planets, csv_path);

    log::info!(
        "wrote {} synthetic planets to {parquet_path} and {csv_path}",
        planets.len()
    );
    println!(
        "Wrote {} synthetic planets to {parquet_path} and {csv_path}",
        planets.len()
    );
}
