/// Data layer: core types, loading, and the two dashboard queries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Arc<[LaunchRecord]>, site / booster indices
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  success breakdown (pie), payload selection (scatter)
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod query;
