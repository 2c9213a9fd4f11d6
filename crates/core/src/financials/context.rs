//! Inputs shared by every step of one aggregation.

use kontor_shared::types::AnalyticPlanId;
use kontor_shared::{AccountCodeRange, AnalyticsConfig};

use crate::records::{AccountType, AccountingSnapshot, MoveType};

/// Snapshot and settings an aggregation reads from.
#[derive(Debug, Clone, Copy)]
pub struct AggregationContext<'a> {
    /// Host records.
    pub snapshot: &'a AccountingSnapshot,
    /// Analytics settings.
    pub settings: &'a AnalyticsConfig,
}

impl<'a> AggregationContext<'a> {
    /// Creates a new context.
    #[must_use]
    pub const fn new(snapshot: &'a AccountingSnapshot, settings: &'a AnalyticsConfig) -> Self {
        Self { snapshot, settings }
    }

    /// Plan cost centers must belong to, if restricted.
    #[must_use]
    pub fn project_plan(&self) -> Option<AnalyticPlanId> {
        self.settings.project_plan_id.map(AnalyticPlanId::from)
    }
}

/// Which party of a document is being aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Customer invoices and credit notes.
    Customer,
    /// Vendor bills and refunds.
    Vendor,
}

impl Side {
    /// Returns true if documents of this type belong to the side.
    #[must_use]
    pub fn accepts_move(self, move_type: MoveType) -> bool {
        match self {
            Self::Customer => move_type.is_customer_document(),
            Self::Vendor => move_type.is_vendor_document(),
        }
    }

    /// Returns true for the revenue or expense accounts aggregated on this side.
    #[must_use]
    pub fn accepts_account(self, account_type: AccountType) -> bool {
        match self {
            Self::Customer => account_type.is_revenue(),
            Self::Vendor => account_type.is_expense(),
        }
    }

    /// Returns true for the receivable or payable account settling the document.
    #[must_use]
    pub fn is_settlement_account(self, account_type: AccountType) -> bool {
        match self {
            Self::Customer => account_type.is_receivable(),
            Self::Vendor => account_type.is_payable(),
        }
    }

    /// Ledger accounts recording cash discounts on this side.
    #[must_use]
    pub fn discount_accounts(self, settings: &AnalyticsConfig) -> AccountCodeRange {
        match self {
            Self::Customer => settings.customer_discount_accounts,
            Self::Vendor => settings.vendor_discount_accounts,
        }
    }
}
