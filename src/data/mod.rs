/// Data layer: core types, loading, filtering, and classification.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Catalog
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Catalog  │  Vec<Record>, column index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply criteria predicates → filtered subset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  composition labels, ephemeral columns
///   └──────────┘
/// ```

pub mod classify;
pub mod filter;
pub mod loader;
pub mod model;
