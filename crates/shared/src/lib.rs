//! Shared identifiers, errors, and configuration for Kontor.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe references to host records
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AccountCodeRange, AnalyticsConfig, AppConfig, DatabaseConfig};
pub use error::{AppError, AppResult};
