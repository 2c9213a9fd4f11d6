//! Recompute service: runs the aggregator and stores its results.

use std::collections::BTreeSet;

use kontor_core::financials::{AggregationContext, FinancialAggregator, ProjectFinancials};
use kontor_core::records::{AccountingSnapshot, Project};
use kontor_core::trigger::{LineChange, RecomputeTrigger};
use kontor_shared::types::{AnalyticAccountId, ProjectId};
use kontor_shared::{AnalyticsConfig, AppError};
use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use tracing::{debug, info, warn};

use crate::repositories::{ProjectRepository, project, snapshot};

/// Error types for recompute operations.
#[derive(Debug, thiserror::Error)]
pub enum RecomputeError {
    /// Project not found.
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RecomputeError> for AppError {
    fn from(err: RecomputeError) -> Self {
        match err {
            RecomputeError::ProjectNotFound(_) => Self::NotFound(err.to_string()),
            RecomputeError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Result of recomputing one project.
#[derive(Debug, Clone)]
pub struct RecomputedProject {
    /// The project, as loaded.
    pub project: Project,
    /// Figures written to the project.
    pub financials: ProjectFinancials,
}

/// Recomputes and stores project financial figures.
#[derive(Debug, Clone)]
pub struct RecomputeService {
    db: DatabaseConnection,
    projects: ProjectRepository,
    settings: AnalyticsConfig,
}

impl RecomputeService {
    /// Creates a new recompute service.
    #[must_use]
    pub fn new(db: DatabaseConnection, settings: AnalyticsConfig) -> Self {
        Self {
            projects: ProjectRepository::new(db.clone()),
            db,
            settings,
        }
    }

    /// Recomputes the given projects.
    ///
    /// Reads and writes happen in one transaction; nothing is written if any
    /// project is missing.
    ///
    /// # Errors
    ///
    /// Returns `RecomputeError::ProjectNotFound` for an unknown project ID, or
    /// a database error.
    pub async fn recompute(
        &self,
        ids: &[ProjectId],
    ) -> Result<Vec<RecomputedProject>, RecomputeError> {
        let ids: Vec<ProjectId> = ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let txn = self.db.begin().await?;

        let projects = project::find_by_ids(&txn, &ids).await?;
        if let Some(missing) = ids
            .iter()
            .find(|id| !projects.iter().any(|p| p.id == **id))
        {
            return Err(RecomputeError::ProjectNotFound(*missing));
        }

        let snapshot = snapshot::load_snapshot(&txn, projects).await?;
        let ctx = AggregationContext::new(&snapshot, &self.settings);

        let mut results = Vec::with_capacity(ids.len());
        for (project, financials) in FinancialAggregator::compute_all(&ctx) {
            let financials = project::store_financials(&txn, project.id, &financials).await?;
            results.push(RecomputedProject {
                project: project.clone(),
                financials,
            });
        }

        txn.commit().await?;

        info!(
            count = results.len(),
            "Recomputed financial data for {} project(s)",
            results.len()
        );
        Ok(results)
    }

    /// Recomputes the most recently created projects.
    ///
    /// Meant to run opportunistically before project figures are displayed;
    /// failures are logged and never returned.
    pub async fn refresh_recent(&self) -> usize {
        match self.try_refresh_recent().await {
            Ok(count) => count,
            Err(err) => {
                warn!(error = %err, "Could not refresh project financial data");
                0
            }
        }
    }

    async fn try_refresh_recent(&self) -> Result<usize, RecomputeError> {
        let projects = self
            .projects
            .find_recent(self.settings.recompute_limit)
            .await?;
        let ids: Vec<ProjectId> = projects.iter().map(|p| p.id).collect();
        Ok(self.recompute(&ids).await?.len())
    }

    /// Recomputes every project affected by a batch of accounting line changes.
    ///
    /// # Errors
    ///
    /// Returns a database error if loading or storing fails.
    pub async fn on_lines_changed(&self, changes: &[LineChange]) -> Result<usize, RecomputeError> {
        let candidates: Vec<AnalyticAccountId> =
            RecomputeTrigger::candidate_accounts(changes).into_iter().collect();
        if candidates.is_empty() {
            debug!(changes = changes.len(), "No cost center touched by line changes");
            return Ok(0);
        }

        let accounts = snapshot::find_analytic_accounts(&self.db, &candidates).await?;
        let projects = self.projects.find_by_analytic_accounts(&candidates).await?;
        let lookup = AccountingSnapshot::builder()
            .analytic_accounts(accounts)
            .projects(projects)
            .build();

        let affected: Vec<ProjectId> =
            RecomputeTrigger::affected_projects(changes, &lookup, &self.settings)
                .into_iter()
                .collect();
        if affected.is_empty() {
            return Ok(0);
        }

        Ok(self.recompute(&affected).await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_maps_to_app_error() {
        let id = ProjectId::new();
        let err: AppError = RecomputeError::ProjectNotFound(id).into();
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains(&id.to_string()));

        let err: AppError = RecomputeError::Database(DbErr::Custom("boom".to_string())).into();
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }
}
