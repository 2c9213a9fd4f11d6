//! `SeaORM` entity definitions.
//!
//! Host accounting tables are read-only for this crate; only the computed
//! columns of `projects` are written.

pub mod accounts;
pub mod analytic_accounts;
pub mod analytic_lines;
pub mod move_line_taxes;
pub mod move_lines;
pub mod moves;
pub mod partial_reconciles;
pub mod projects;
pub mod taxes;
