//! Uninstall teardown.

use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::{info, warn};

use crate::migration::m20260301_000002_project_analytics::DROP_COLUMNS_SQL;

/// Drops the computed columns from `projects`.
///
/// Failures are logged and swallowed so an uninstall never aborts here.
pub async fn drop_computed_columns(db: &DatabaseConnection) {
    match db.execute_unprepared(DROP_COLUMNS_SQL).await {
        Ok(_) => info!("Dropped project financial columns"),
        Err(err) => warn!(error = %err, "Could not drop project financial columns"),
    }
}
