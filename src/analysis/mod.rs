/// Analysis layer: stateless reports and chart specs computed from a
/// [`Table`](crate::data::model::Table).
///
/// Every function here is a pure value-in/value-out computation. Components
/// are independent: a degenerate input (no numeric columns, no datetime
/// candidates, empty text sample) yields an empty/None report for that one
/// component and never blocks the others. Rendering belongs to `ui`.

pub mod categorical;
pub mod correlation;
pub mod distribution;
pub mod missing;
pub mod stats;
pub mod summary;
pub mod text;
pub mod timeseries;
