//! Project financial aggregation.
//!
//! Folds the accounting activity attributed to a project's cost center into
//! a [`ProjectFinancials`] record: customer revenue and settlement, vendor
//! bills, labor, other costs, and the derived profit/loss.

pub mod context;
pub mod costs;
pub mod documents;
pub mod resolution;
pub mod service;
pub mod settlement;
pub mod types;


pub use context::{AggregationContext, Side};
pub use resolution::{is_project_cost_center, resolve_cost_center};
pub use service::FinancialAggregator;
pub use types::{
    CustomerRevenue, LaborCosts, OtherCosts, ProjectFinancials, Settlement, VendorCosts,
};
