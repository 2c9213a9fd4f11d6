//! Host accounting records.
//!
//! The aggregator never queries the host directly. The persistence layer
//! loads the records relevant to a computation into an `AccountingSnapshot`,
//! which indexes them once for the lookups the aggregation needs.

pub mod error;
pub mod snapshot;
pub mod types;

pub use error::RecordError;
pub use snapshot::{AccountingSnapshot, SnapshotBuilder};
pub use types::{
    Account, AccountType, AnalyticAccount, AnalyticLine, DisplayType, Move, MoveLine, MoveState,
    MoveType, PartialReconcile, Project, Tax, TaxAmountType,
};
