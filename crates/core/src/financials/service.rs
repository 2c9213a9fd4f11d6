//! Financial aggregator.

use kontor_shared::types::AnalyticAccountId;
use tracing::{debug, warn};

use super::context::AggregationContext;
use super::costs::{labor_costs, other_costs};
use super::documents::{customer_revenue, vendor_costs};
use super::resolution::resolve_cost_center;
use super::types::ProjectFinancials;
use crate::records::Project;

/// Computes project financials from an accounting snapshot.
pub struct FinancialAggregator;

impl FinancialAggregator {
    /// Computes the financial figures of `project`.
    ///
    /// A project without a resolvable cost center gets all-zero figures.
    #[must_use]
    pub fn compute(project: &Project, ctx: &AggregationContext<'_>) -> ProjectFinancials {
        let Some(center) = resolve_cost_center(project, ctx) else {
            warn!(
                project_id = %project.id,
                project = %project.name,
                "No analytic account found for project, financial figures reset to zero"
            );
            return ProjectFinancials::default();
        };

        Self::compute_for_center(project, center.id, ctx)
    }

    /// Computes the figures of `project` from an already resolved cost center.
    #[must_use]
    pub fn compute_for_center(
        project: &Project,
        center: AnalyticAccountId,
        ctx: &AggregationContext<'_>,
    ) -> ProjectFinancials {
        let financials = ProjectFinancials::assemble(
            customer_revenue(ctx, center),
            vendor_costs(ctx, center),
            labor_costs(ctx, project, center),
            other_costs(ctx, center),
        );

        debug!(
            project_id = %project.id,
            analytic_account_id = %center,
            invoiced = %financials.customer_invoiced_amount,
            vendor_bills = %financials.vendor_bills_total,
            costs_net = %financials.total_costs_net,
            profit_loss = %financials.profit_loss,
            "Computed project financials"
        );

        financials
    }

    /// Computes every project of the snapshot, in snapshot order.
    #[must_use]
    pub fn compute_all<'a>(
        ctx: &AggregationContext<'a>,
    ) -> Vec<(&'a Project, ProjectFinancials)> {
        ctx.snapshot
            .projects()
            .iter()
            .map(|project| (project, Self::compute(project, ctx)))
            .collect()
    }
}
