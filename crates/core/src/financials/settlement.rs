//! Settlement split of a document contribution.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::warn;

use super::context::{AggregationContext, Side};
use super::types::Settlement;
use crate::records::Move;

/// Splits `contribution` of `document` into paid and cash discount portions.
///
/// Every partial reconcile on the document's receivable (customer) or
/// payable (vendor) lines settles `contribution * amount / amount_total`.
/// The portion counts as a cash discount when the counterpart line is posted
/// to a discount account of the side, and as a payment otherwise, including
/// when the counterpart cannot be found. Without any partial reconcile the
/// paid portion follows the document residual.
#[must_use]
pub fn split_settlement(
    ctx: &AggregationContext<'_>,
    document: &Move,
    side: Side,
    contribution: Decimal,
) -> Settlement {
    let total = document.amount_total;
    if total.is_zero() {
        return Settlement::default();
    }

    let snapshot = ctx.snapshot;
    let discount_accounts = side.discount_accounts(ctx.settings);

    let mut settlement = Settlement::default();
    let mut seen = HashSet::new();

    for line in snapshot.lines_of_move(document.id) {
        let settles_document = snapshot
            .account_of(line)
            .is_some_and(|account| side.is_settlement_account(account.account_type));
        if !settles_document {
            continue;
        }

        for partial in snapshot.partials_for_line(line.id) {
            if !seen.insert(partial.id) {
                continue;
            }

            let Some(portion) = prorate(contribution, partial.amount, total) else {
                warn!(
                    move_id = %document.id,
                    partial_reconcile_id = %partial.id,
                    "Skipping reconciliation whose share overflows"
                );
                continue;
            };
            let is_discount = partial
                .counterpart_of(line.id)
                .and_then(|id| snapshot.move_line(id))
                .and_then(|counterpart| snapshot.account_of(counterpart))
                .is_some_and(|account| discount_accounts.contains(&account.code));

            if is_discount {
                settlement.skonto += portion;
            } else {
                settlement.paid += portion;
            }
        }
    }

    if seen.is_empty() {
        let settled = document.amount_total - document.amount_residual;
        match prorate(contribution, settled, total) {
            Some(paid) => settlement.paid = paid,
            None => warn!(move_id = %document.id, "Skipping residual whose share overflows"),
        }
    }

    settlement
}

/// `value * part / whole`, dividing first when the product would overflow.
///
/// `whole` must not be zero.
fn prorate(value: Decimal, part: Decimal, whole: Decimal) -> Option<Decimal> {
    value
        .checked_mul(part)
        .and_then(|product| product.checked_div(whole))
        .or_else(|| part.checked_div(whole).and_then(|ratio| value.checked_mul(ratio)))
}
