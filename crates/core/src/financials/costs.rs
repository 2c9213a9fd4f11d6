//! Labor and other costs booked on a cost center.

use kontor_shared::types::AnalyticAccountId;
use rust_decimal::Decimal;

use super::context::AggregationContext;
use super::types::{LaborCosts, OtherCosts};
use crate::records::{AnalyticLine, Project};

/// Timesheet hours and cost of `project` on `center`.
///
/// Entries tagged with the project are used when there are any; otherwise
/// every timesheet entry of the center counts.
#[must_use]
pub fn labor_costs(
    ctx: &AggregationContext<'_>,
    project: &Project,
    center: AnalyticAccountId,
) -> LaborCosts {
    let timesheets: Vec<&AnalyticLine> = ctx
        .snapshot
        .analytic_lines_for(center)
        .filter(|line| line.is_timesheet)
        .collect();
    let tagged: Vec<&AnalyticLine> = timesheets
        .iter()
        .copied()
        .filter(|line| line.project_id == Some(project.id))
        .collect();
    let entries = if tagged.is_empty() { timesheets } else { tagged };

    LaborCosts {
        hours: entries.iter().map(|line| line.unit_amount).sum(),
        cost: entries.iter().map(|line| line.amount.abs()).sum(),
    }
}

/// Costs on `center` outside timesheets and vendor bills, with their tax.
///
/// Only entries with a negative amount are costs. Tax comes from the taxes
/// of the originating move line; an entry without one adds no tax.
#[must_use]
pub fn other_costs(ctx: &AggregationContext<'_>, center: AnalyticAccountId) -> OtherCosts {
    let snapshot = ctx.snapshot;
    let mut costs = OtherCosts::default();

    for line in snapshot.analytic_lines_for(center) {
        if line.is_timesheet || line.amount >= Decimal::ZERO {
            continue;
        }

        let origin = line.move_line_id.and_then(|id| snapshot.move_line(id));
        // Vendor bills are already in the vendor total.
        let from_vendor_document = origin
            .and_then(|move_line| snapshot.move_by_id(move_line.move_id))
            .is_some_and(|document| document.move_type.is_vendor_document());
        if from_vendor_document {
            continue;
        }

        let cost = line.amount.abs();
        costs.net += cost;
        if let Some(move_line) = origin {
            costs.tax += move_line
                .tax_ids
                .iter()
                .filter_map(|id| snapshot.tax(*id))
                .map(|tax| tax.amount_on(cost))
                .sum::<Decimal>();
        }
    }

    costs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{MoveType, TaxAmountType};
    use crate::test_support::{Fixture, dist};
    use kontor_shared::types::{MoveLineId, ProjectId};
    use rust_decimal_macros::dec;

    #[test]
    fn test_tagged_timesheets_are_preferred() {
        let mut fixture = Fixture::new();
        let project = fixture.project.id;
        fixture.timesheet(dec!(8), dec!(-400), Some(project));
        fixture.timesheet(dec!(2), dec!(-100), Some(ProjectId::new()));
        fixture.timesheet(dec!(3), dec!(-150), None);
        let snapshot = fixture.snapshot();
        let ctx = AggregationContext::new(&snapshot, &fixture.settings);

        let labor = labor_costs(&ctx, &fixture.project, fixture.center.id);
        assert_eq!(labor.hours, dec!(8));
        assert_eq!(labor.cost, dec!(400));
    }

    #[test]
    fn test_untagged_timesheets_are_the_fallback() {
        let mut fixture = Fixture::new();
        fixture.timesheet(dec!(2), dec!(-100), Some(ProjectId::new()));
        fixture.timesheet(dec!(3), dec!(-150), None);
        let snapshot = fixture.snapshot();
        let ctx = AggregationContext::new(&snapshot, &fixture.settings);

        let labor = labor_costs(&ctx, &fixture.project, fixture.center.id);
        assert_eq!(labor.hours, dec!(5));
        assert_eq!(labor.cost, dec!(250));
    }

    #[test]
    fn test_other_costs_skip_income_timesheets_and_vendor_bills() {
        let mut fixture = Fixture::new();
        let bill = fixture.post(
            MoveType::InInvoice,
            &[(dec!(200), dist(&[(fixture.center.id, 100)]))],
        );
        fixture.cost(dec!(-200), Some(bill.product_lines[0].id));
        fixture.cost(dec!(75), None);
        fixture.cost(dec!(-30), None);
        fixture.cost(dec!(-20), Some(MoveLineId::new()));
        fixture.timesheet(dec!(1), dec!(-50), None);
        let snapshot = fixture.snapshot();
        let ctx = AggregationContext::new(&snapshot, &fixture.settings);

        let costs = other_costs(&ctx, fixture.center.id);
        assert_eq!(costs.net, dec!(50));
        assert_eq!(costs.tax, dec!(0));
    }

    #[test]
    fn test_tax_by_amount_type() {
        let mut fixture = Fixture::new();
        fixture.taxed_cost(
            dec!(100),
            &[
                (TaxAmountType::Percent, dec!(19)),
                (TaxAmountType::Fixed, dec!(2.50)),
                (TaxAmountType::Division, dec!(7)),
            ],
        );
        let snapshot = fixture.snapshot();
        let ctx = AggregationContext::new(&snapshot, &fixture.settings);

        let costs = other_costs(&ctx, fixture.center.id);
        assert_eq!(costs.net, dec!(100));
        assert_eq!(costs.tax, dec!(21.50));
    }
}
