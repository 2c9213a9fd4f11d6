//! Maps accounting line changes to the projects they affect.

use std::collections::BTreeSet;

use kontor_shared::AnalyticsConfig;
use kontor_shared::types::{AnalyticAccountId, AnalyticPlanId, ProjectId};
use tracing::{debug, warn};

use super::types::LineChange;
use crate::distribution::decode_account_keys;
use crate::financials::is_project_cost_center;
use crate::records::AccountingSnapshot;

/// Decides which projects need their figures recomputed.
pub struct RecomputeTrigger;

impl RecomputeTrigger {
    /// Cost centers named by the triggering changes, before any lookup.
    ///
    /// Updates that touched no relevant field are ignored. Keys that do not
    /// parse are skipped.
    #[must_use]
    pub fn candidate_accounts(changes: &[LineChange]) -> BTreeSet<AnalyticAccountId> {
        let mut accounts = BTreeSet::new();

        for change in changes {
            if !change.kind.triggers_recompute() {
                continue;
            }
            let Some(raw) = change.analytic_distribution.as_ref().filter(|v| !v.is_null()) else {
                continue;
            };

            match decode_account_keys(raw) {
                Ok(keys) => accounts.extend(keys),
                Err(err) => {
                    warn!(move_line_id = %change.line_id, error = %err, "Ignoring malformed analytic distribution");
                }
            }
        }

        accounts
    }

    /// Candidate cost centers that exist and lie inside the configured plan.
    #[must_use]
    pub fn affected_accounts(
        changes: &[LineChange],
        snapshot: &AccountingSnapshot,
        settings: &AnalyticsConfig,
    ) -> BTreeSet<AnalyticAccountId> {
        let plan = settings.project_plan_id.map(AnalyticPlanId::from);

        Self::candidate_accounts(changes)
            .into_iter()
            .filter(|id| {
                let eligible = snapshot
                    .analytic_account(*id)
                    .is_some_and(|account| is_project_cost_center(account, plan));
                if !eligible {
                    debug!(analytic_account_id = %id, "Skipping unknown or out-of-plan analytic account");
                }
                eligible
            })
            .collect()
    }

    /// Projects referencing any affected cost center through either reference.
    #[must_use]
    pub fn affected_projects(
        changes: &[LineChange],
        snapshot: &AccountingSnapshot,
        settings: &AnalyticsConfig,
    ) -> BTreeSet<ProjectId> {
        Self::affected_accounts(changes, snapshot, settings)
            .into_iter()
            .flat_map(|account| snapshot.projects_for_account(account))
            .map(|project| project.id)
            .collect()
    }
}
