//! cashport-core: canonical transaction model, per-endpoint normalizers,
//! duplicate resolution and aggregation for the cash-account export pipeline.

pub mod aggregate;
pub mod merge;
pub mod money;
pub mod overlap;
pub mod raw;
pub mod sources;
pub mod transaction;

pub use aggregate::{Aggregate, aggregate};
pub use merge::deep_merge;
pub use overlap::InclusionRules;
pub use transaction::{CellValue, Settlement, SourceApi, Transaction};
