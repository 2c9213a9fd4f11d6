//! Analytic distribution maps.
//!
//! A move line carries a JSON object mapping cost-center identifiers to the
//! percentage of the line amount attributed to each of them. This module
//! decodes that object once into a typed [`DistributionMap`].

pub mod error;
pub mod map;

pub use error::DistributionError;
pub use map::{DistributionMap, decode_account_keys};
