//! Host accounting records read by the aggregator.
//!
//! These mirror the host platform's business objects. Selection fields are
//! stored by the host as plain strings; each enum here parses the host
//! spelling and rejects anything it does not know.

use std::str::FromStr;

use kontor_shared::types::{
    AccountId, AnalyticAccountId, AnalyticLineId, AnalyticPlanId, MoveId, MoveLineId,
    PartialReconcileId, ProjectId, TaxId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::RecordError;

/// Generates `as_str`, `Display` and `FromStr` for a host selection enum.
macro_rules! host_selection {
    ($name:ident, $field:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Returns the host spelling of this value.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = RecordError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(RecordError::UnknownSelection {
                        field: $field,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

/// A project whose financial fields are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Name of the client (partner).
    pub partner_name: Option<String>,
    /// Name of the responsible user (head of project).
    pub user_name: Option<String>,
    /// Primary cost-center reference.
    pub account_id: Option<AnalyticAccountId>,
    /// Secondary cost-center reference, consulted when the primary one is unusable.
    pub analytic_account_id: Option<AnalyticAccountId>,
}

/// Analytic account (cost center).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticAccount {
    /// Analytic account ID.
    pub id: AnalyticAccountId,
    /// Display name.
    pub name: String,
    /// Optional reference code.
    pub code: Option<String>,
    /// Plan (classification) this account belongs to.
    pub plan_id: Option<AnalyticPlanId>,
}

/// Ledger account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Receivable.
    AssetReceivable,
    /// Bank and cash.
    AssetCash,
    /// Current assets.
    AssetCurrent,
    /// Non-current assets.
    AssetNonCurrent,
    /// Prepayments.
    AssetPrepayments,
    /// Fixed assets.
    AssetFixed,
    /// Payable.
    LiabilityPayable,
    /// Credit card.
    LiabilityCreditCard,
    /// Current liabilities.
    LiabilityCurrent,
    /// Non-current liabilities.
    LiabilityNonCurrent,
    /// Equity.
    Equity,
    /// Current year earnings.
    EquityUnaffected,
    /// Income.
    Income,
    /// Other income.
    IncomeOther,
    /// Expenses.
    Expense,
    /// Depreciation.
    ExpenseDepreciation,
    /// Cost of revenue.
    ExpenseDirectCost,
    /// Off-balance sheet.
    OffBalance,
}

host_selection!(AccountType, "account_type", {
    AssetReceivable => "asset_receivable",
    AssetCash => "asset_cash",
    AssetCurrent => "asset_current",
    AssetNonCurrent => "asset_non_current",
    AssetPrepayments => "asset_prepayments",
    AssetFixed => "asset_fixed",
    LiabilityPayable => "liability_payable",
    LiabilityCreditCard => "liability_credit_card",
    LiabilityCurrent => "liability_current",
    LiabilityNonCurrent => "liability_non_current",
    Equity => "equity",
    EquityUnaffected => "equity_unaffected",
    Income => "income",
    IncomeOther => "income_other",
    Expense => "expense",
    ExpenseDepreciation => "expense_depreciation",
    ExpenseDirectCost => "expense_direct_cost",
    OffBalance => "off_balance",
});

impl AccountType {
    /// Returns true for revenue-type accounts.
    #[must_use]
    pub fn is_revenue(&self) -> bool {
        matches!(self, Self::Income | Self::IncomeOther)
    }

    /// Returns true for expense-type accounts.
    #[must_use]
    pub fn is_expense(&self) -> bool {
        matches!(
            self,
            Self::Expense | Self::ExpenseDepreciation | Self::ExpenseDirectCost
        )
    }

    /// Returns true for the customer settlement side.
    #[must_use]
    pub fn is_receivable(&self) -> bool {
        matches!(self, Self::AssetReceivable)
    }

    /// Returns true for the vendor settlement side.
    #[must_use]
    pub fn is_payable(&self) -> bool {
        matches!(self, Self::LiabilityPayable)
    }
}

/// Chart of accounts entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Account code (usually numeric, e.g. "8736").
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
}

/// Document type of an accounting move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    /// Journal entry.
    Entry,
    /// Customer invoice.
    OutInvoice,
    /// Customer credit note.
    OutRefund,
    /// Vendor bill.
    InInvoice,
    /// Vendor refund.
    InRefund,
    /// Sales receipt.
    OutReceipt,
    /// Purchase receipt.
    InReceipt,
}

host_selection!(MoveType, "move_type", {
    Entry => "entry",
    OutInvoice => "out_invoice",
    OutRefund => "out_refund",
    InInvoice => "in_invoice",
    InRefund => "in_refund",
    OutReceipt => "out_receipt",
    InReceipt => "in_receipt",
});

impl MoveType {
    /// Returns true for customer invoices and credit notes.
    #[must_use]
    pub fn is_customer_document(&self) -> bool {
        matches!(self, Self::OutInvoice | Self::OutRefund)
    }

    /// Returns true for vendor bills and refunds.
    #[must_use]
    pub fn is_vendor_document(&self) -> bool {
        matches!(self, Self::InInvoice | Self::InRefund)
    }

    /// Returns true for credit notes and vendor refunds.
    #[must_use]
    pub fn is_refund(&self) -> bool {
        matches!(self, Self::OutRefund | Self::InRefund)
    }
}

/// Lifecycle state of an accounting move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveState {
    /// Draft, still editable.
    Draft,
    /// Posted, final.
    Posted,
    /// Cancelled.
    Cancel,
}

host_selection!(MoveState, "state", {
    Draft => "draft",
    Posted => "posted",
    Cancel => "cancel",
});

/// Accounting move (invoice, bill, payment, journal entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Move ID.
    pub id: MoveId,
    /// Document number.
    pub name: String,
    /// Document type.
    pub move_type: MoveType,
    /// Lifecycle state.
    pub state: MoveState,
    /// Total amount including tax (always positive for invoices and refunds).
    pub amount_total: Decimal,
    /// Amount still to be settled.
    pub amount_residual: Decimal,
    /// The move this one reverses, if it is a reversal.
    pub reversed_entry_id: Option<MoveId>,
}

impl Move {
    /// Returns true if the move is posted.
    #[must_use]
    pub fn is_posted(&self) -> bool {
        self.state == MoveState::Posted
    }

    /// Returns true if this move reverses another one.
    #[must_use]
    pub fn is_reversal(&self) -> bool {
        self.reversed_entry_id.is_some()
    }
}

/// Display role of a move line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    /// Regular product line.
    Product,
    /// Cost of goods sold.
    Cogs,
    /// Tax line.
    Tax,
    /// Discount line.
    Discount,
    /// Rounding line.
    Rounding,
    /// Payment term (receivable/payable) line.
    PaymentTerm,
    /// Section heading.
    LineSection,
    /// Free-text note.
    LineNote,
    /// Early payment discount line.
    Epd,
}

host_selection!(DisplayType, "display_type", {
    Product => "product",
    Cogs => "cogs",
    Tax => "tax",
    Discount => "discount",
    Rounding => "rounding",
    PaymentTerm => "payment_term",
    LineSection => "line_section",
    LineNote => "line_note",
    Epd => "epd",
});

impl DisplayType {
    /// Returns true for section and note lines that carry no amount.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::LineSection | Self::LineNote)
    }
}

/// Accounting line of a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveLine {
    /// Move line ID.
    pub id: MoveLineId,
    /// Parent move.
    pub move_id: MoveId,
    /// Ledger account (absent on section and note lines).
    pub account_id: Option<AccountId>,
    /// Display role.
    pub display_type: DisplayType,
    /// Amount excluding tax.
    pub price_subtotal: Decimal,
    /// Amount including tax.
    pub price_total: Decimal,
    /// Taxes applied to this line.
    pub tax_ids: Vec<TaxId>,
    /// Raw analytic distribution as stored by the host.
    pub analytic_distribution: Option<serde_json::Value>,
}

/// Reconciliation link between a debit line and a credit line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialReconcile {
    /// Partial reconcile ID.
    pub id: PartialReconcileId,
    /// Debit side.
    pub debit_move_line_id: MoveLineId,
    /// Credit side.
    pub credit_move_line_id: MoveLineId,
    /// Settled amount.
    pub amount: Decimal,
}

impl PartialReconcile {
    /// Returns the line on the other side of `line_id`, if `line_id` is part of this link.
    #[must_use]
    pub fn counterpart_of(&self, line_id: MoveLineId) -> Option<MoveLineId> {
        if self.debit_move_line_id == line_id {
            Some(self.credit_move_line_id)
        } else if self.credit_move_line_id == line_id {
            Some(self.debit_move_line_id)
        } else {
            None
        }
    }
}

/// Analytic line (cost or revenue booked directly on a cost center).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticLine {
    /// Analytic line ID.
    pub id: AnalyticLineId,
    /// Cost center.
    pub account_id: AnalyticAccountId,
    /// Project the line was booked on, if any.
    pub project_id: Option<ProjectId>,
    /// True for timesheet entries.
    pub is_timesheet: bool,
    /// Quantity (hours for timesheets).
    pub unit_amount: Decimal,
    /// Amount (negative for costs).
    pub amount: Decimal,
    /// Originating move line, if any.
    pub move_line_id: Option<MoveLineId>,
}

/// How a tax amount is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxAmountType {
    /// Percentage of the base.
    Percent,
    /// Fixed amount.
    Fixed,
    /// Percentage included in the price.
    Division,
    /// Group of taxes.
    Group,
}

host_selection!(TaxAmountType, "amount_type", {
    Percent => "percent",
    Fixed => "fixed",
    Division => "division",
    Group => "group",
});

/// Tax definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tax {
    /// Tax ID.
    pub id: TaxId,
    /// Tax name.
    pub name: String,
    /// Computation method.
    pub amount_type: TaxAmountType,
    /// Rate (percent) or flat amount (fixed).
    pub amount: Decimal,
}

impl Tax {
    /// Tax added on top of a cost of `base`.
    ///
    /// Only percent and fixed taxes contribute; other types yield zero.
    #[must_use]
    pub fn amount_on(&self, base: Decimal) -> Decimal {
        match self.amount_type {
            TaxAmountType::Percent => base.abs() * self.amount / Decimal::ONE_HUNDRED,
            TaxAmountType::Fixed => self.amount,
            TaxAmountType::Division | TaxAmountType::Group => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("out_invoice", MoveType::OutInvoice)]
    #[case("out_refund", MoveType::OutRefund)]
    #[case("in_invoice", MoveType::InInvoice)]
    #[case("in_refund", MoveType::InRefund)]
    #[case("entry", MoveType::Entry)]
    fn test_move_type_from_str(#[case] text: &str, #[case] expected: MoveType) {
        assert_eq!(text.parse::<MoveType>().unwrap(), expected);
        assert_eq!(expected.as_str(), text);
    }

    #[test]
    fn test_unknown_selection_is_rejected() {
        let err = "out_quote".parse::<MoveType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown value 'out_quote' for field move_type"
        );
    }

    #[test]
    fn test_account_type_classification() {
        assert!(AccountType::Income.is_revenue());
        assert!(AccountType::IncomeOther.is_revenue());
        assert!(!AccountType::Expense.is_revenue());
        assert!(AccountType::ExpenseDirectCost.is_expense());
        assert!(AccountType::ExpenseDepreciation.is_expense());
        assert!(!AccountType::LiabilityPayable.is_expense());
        assert!(AccountType::AssetReceivable.is_receivable());
        assert!(AccountType::LiabilityPayable.is_payable());
    }

    #[test]
    fn test_move_type_sides() {
        assert!(MoveType::OutInvoice.is_customer_document());
        assert!(MoveType::OutRefund.is_customer_document());
        assert!(!MoveType::OutReceipt.is_customer_document());
        assert!(MoveType::InInvoice.is_vendor_document());
        assert!(MoveType::InRefund.is_refund());
        assert!(!MoveType::InInvoice.is_refund());
    }

    #[test]
    fn test_display_type_placeholder() {
        assert!(DisplayType::LineSection.is_placeholder());
        assert!(DisplayType::LineNote.is_placeholder());
        assert!(!DisplayType::Product.is_placeholder());
        assert!(!DisplayType::Tax.is_placeholder());
    }

    #[test]
    fn test_counterpart_of() {
        let debit = MoveLineId::new();
        let credit = MoveLineId::new();
        let partial = PartialReconcile {
            id: PartialReconcileId::new(),
            debit_move_line_id: debit,
            credit_move_line_id: credit,
            amount: dec!(10),
        };
        assert_eq!(partial.counterpart_of(debit), Some(credit));
        assert_eq!(partial.counterpart_of(credit), Some(debit));
        assert_eq!(partial.counterpart_of(MoveLineId::new()), None);
    }

    #[rstest]
    #[case(TaxAmountType::Percent, dec!(19), dec!(-100), dec!(19))]
    #[case(TaxAmountType::Percent, dec!(7), dec!(200), dec!(14))]
    #[case(TaxAmountType::Fixed, dec!(5), dec!(-100), dec!(5))]
    #[case(TaxAmountType::Division, dec!(19), dec!(-100), dec!(0))]
    #[case(TaxAmountType::Group, dec!(19), dec!(-100), dec!(0))]
    fn test_tax_amount_on(
        #[case] amount_type: TaxAmountType,
        #[case] rate: Decimal,
        #[case] base: Decimal,
        #[case] expected: Decimal,
    ) {
        let tax = Tax {
            id: TaxId::new(),
            name: "VAT".to_string(),
            amount_type,
            amount: rate,
        };
        assert_eq!(tax.amount_on(base), expected);
    }
}
