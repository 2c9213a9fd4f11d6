//! Cost center resolution.

use kontor_shared::types::{AnalyticAccountId, AnalyticPlanId};

use super::context::AggregationContext;
use crate::records::{AnalyticAccount, Project};

/// Returns true if `account` may carry project figures under the plan restriction.
#[must_use]
pub fn is_project_cost_center(account: &AnalyticAccount, plan: Option<AnalyticPlanId>) -> bool {
    plan.is_none_or(|plan| account.plan_id == Some(plan))
}

/// Finds the cost center a project's figures are read from.
///
/// The primary reference wins when it names an existing account inside the
/// configured plan; the secondary reference is tried next.
#[must_use]
pub fn resolve_cost_center<'a>(
    project: &Project,
    ctx: &AggregationContext<'a>,
) -> Option<&'a AnalyticAccount> {
    let plan = ctx.project_plan();
    [project.account_id, project.analytic_account_id]
        .into_iter()
        .flatten()
        .find_map(|id: AnalyticAccountId| {
            ctx.snapshot
                .analytic_account(id)
                .filter(|account| is_project_cost_center(account, plan))
        })
}
