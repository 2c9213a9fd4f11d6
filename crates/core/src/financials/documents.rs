//! Customer invoice and vendor bill aggregation.

use kontor_shared::types::AnalyticAccountId;
use rust_decimal::Decimal;
use tracing::trace;

use super::context::{AggregationContext, Side};
use super::settlement::split_settlement;
use super::types::{CustomerRevenue, Settlement, VendorCosts};

/// Amount attributed to a cost center on one side, with its settlement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentTotals {
    /// Attributed amount, refunds negative.
    pub amount: Decimal,
    /// How the attributed amount was settled.
    pub settlement: Settlement,
}

/// Sums the document lines of `side` attributed to `center`.
///
/// A line counts when its move is posted and of the side's document type,
/// it is not a section or note, its account is a revenue (customer) or
/// expense (vendor) account, and its distribution names the center. Lines
/// of reversal moves and of reversed moves are skipped so that a document
/// and its reversal cancel out. Refund lines contribute negatively.
#[must_use]
pub fn aggregate_documents(
    ctx: &AggregationContext<'_>,
    center: AnalyticAccountId,
    side: Side,
) -> DocumentTotals {
    let snapshot = ctx.snapshot;
    let mut totals = DocumentTotals::default();

    for line in snapshot.move_lines() {
        let Some(distribution) = snapshot.distribution(line.id) else {
            continue;
        };
        let Some(document) = snapshot.move_by_id(line.move_id) else {
            continue;
        };
        if !document.is_posted()
            || !side.accepts_move(document.move_type)
            || line.display_type.is_placeholder()
        {
            continue;
        }
        let counts = snapshot
            .account_of(line)
            .is_some_and(|account| side.accepts_account(account.account_type));
        if !counts {
            continue;
        }
        if document.is_reversal() || snapshot.is_reversed(document.id) {
            trace!(move_id = %document.id, move_line_id = %line.id, "Skipping reversed document line");
            continue;
        }

        let Some(share) = distribution.share_of(center, line.price_total) else {
            continue;
        };
        let contribution = if document.move_type.is_refund() {
            -share
        } else {
            share
        };

        totals.amount += contribution;
        if !document.amount_total.is_zero() {
            totals.settlement += split_settlement(ctx, document, side, contribution);
        }
    }

    totals
}

/// Customer invoices and credit notes attributed to `center`.
#[must_use]
pub fn customer_revenue(ctx: &AggregationContext<'_>, center: AnalyticAccountId) -> CustomerRevenue {
    let totals = aggregate_documents(ctx, center, Side::Customer);
    CustomerRevenue {
        invoiced: totals.amount,
        paid: totals.settlement.paid,
        skonto: totals.settlement.skonto,
    }
}

/// Vendor bills and refunds attributed to `center`.
#[must_use]
pub fn vendor_costs(ctx: &AggregationContext<'_>, center: AnalyticAccountId) -> VendorCosts {
    let totals = aggregate_documents(ctx, center, Side::Vendor);
    VendorCosts {
        total: totals.amount,
        skonto: totals.settlement.skonto,
    }
}
