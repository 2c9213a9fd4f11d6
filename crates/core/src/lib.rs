//! Core business logic for Kontor.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, aggregation rules, and calculations live here.
//!
//! # Modules
//!
//! - `records` - Host accounting records and the snapshot they are read from
//! - `distribution` - Analytic distribution maps (cost center -> percentage)
//! - `financials` - Project financial aggregation
//! - `trigger` - Mapping accounting line changes to affected projects

pub mod distribution;
pub mod financials;
pub mod records;
pub mod trigger;

#[cfg(test)]
mod test_support;
