/// Data layer: raw rows, normalization and filtering.
///
/// Architecture:
/// ```text
///   play-by-play .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRow>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  competition filter, coordinates, derived columns
///   └───────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │CanonicalTable │  Vec<CanonicalRow>, cached by DatasetCache
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply event predicates → matching indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
