/// Data layer: core types, loading, caching, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PaperDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  memoized load, reused across frames
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive year range → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  summary  │  per-year counts, top journals, table rows
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
