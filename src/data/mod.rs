/// Data layer: core types and CSV loading.
///
/// Architecture:
/// ```text
///      uploaded .csv bytes
///             │
///             ▼
///       ┌──────────┐
///       │  loader   │  UTF-8 parse, Latin-1 fallback, header dedup
///       └──────────┘
///             │
///             ▼
///       ┌──────────┐
///       │   Table   │  Vec<Column>, one-shot ColumnKind classification
///       └──────────┘
///             │
///             ▼
///      numeric / textual / datetime views consumed by analysis
/// ```

pub mod loader;
pub mod model;
