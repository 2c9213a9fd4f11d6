//! Database migration runner for Kontor.
//!
//! Usage:
//!   migrator up      - Create the accounting schema and the project figure columns
//!   migrator down    - Roll back the last migration (drops the figure columns first)
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations

use kontor_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The migrator CLI sets up its own tracing and reads DATABASE_URL.
    cli::run_cli(Migrator).await;
}
