//! Exploratory-analysis toolkit for a confirmed-exoplanet catalog.
//!
//! The center of the crate is a pure, stateless filter engine:
//! [`apply_filters`] takes a loaded [`Catalog`] and a [`Criteria`] set and
//! returns the subset of planets passing every active criterion. Around it:
//!
//! * [`data::loader`] — read the catalog from CSV, JSON, or Parquet
//! * [`data::classify`] — the temperature-dependent host-star discriminator
//!   and the rocky / water-world / sub-Neptune composition classifier
//! * [`presets`] — named criteria sets for missions, stellar types, and
//!   published paper samples
//! * [`curves`] — reference mass-radius tables from interior models
//! * [`session`] — a small exploration session caching the visible rows
//!
//! ```no_run
//! use std::path::Path;
//! use exosift::{apply_filters, data::loader, Criteria};
//!
//! # fn main() -> anyhow::Result<()> {
//! let catalog = loader::load_file(Path::new("confirmed_planets.csv"))?;
//! let small_m_dwarf_planets = apply_filters(
//!     &catalog,
//!     &Criteria {
//!         spectral_prefix: Some("M".into()),
//!         radius_max: Some(4.0),
//!         ..Criteria::default()
//!     },
//! );
//! println!("{}", small_m_dwarf_planets.preview(20)?);
//! # Ok(())
//! # }
//! ```

pub mod curves;
pub mod data;
pub mod presets;
pub mod session;

pub use data::classify::{classify_planet, with_composition, Composition, HostBranch};
pub use data::filter::{apply_filters, filtered_indices, Criteria, CriteriaError};
pub use data::model::{columns, Catalog, CatalogValue, Record};
pub use presets::Preset;
pub use session::Session;
