//! Financial aggregation data types.

use std::ops::AddAssign;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Computed financial figures of one project.
///
/// All fields are zero when the project has no resolvable cost center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFinancials {
    /// Customer invoices attributed to the project, net of credit notes.
    pub customer_invoiced_amount: Decimal,
    /// Portion of the invoiced amount settled by ordinary payments.
    pub customer_paid_amount: Decimal,
    /// Invoiced amount neither paid nor settled by a cash discount.
    pub customer_outstanding_amount: Decimal,
    /// Cash discounts granted to customers.
    pub customer_skonto_taken: Decimal,
    /// Vendor bills attributed to the project, net of vendor refunds.
    pub vendor_bills_total: Decimal,
    /// Cash discounts received from vendors.
    pub vendor_skonto_received: Decimal,
    /// Labor plus other costs, excluding tax.
    pub total_costs_net: Decimal,
    /// Net costs plus the tax on other costs.
    pub total_costs_with_tax: Decimal,
    /// Adjusted revenue minus adjusted vendor bills and net costs.
    pub profit_loss: Decimal,
    /// Size of the loss, or zero on profit.
    pub negative_difference: Decimal,
    /// Timesheet hours booked on the project.
    pub total_hours_booked: Decimal,
    /// Cost of the booked hours.
    pub labor_costs: Decimal,
}

impl ProjectFinancials {
    /// Derives the project figures from the four partial results.
    #[must_use]
    pub fn assemble(
        revenue: CustomerRevenue,
        vendor: VendorCosts,
        labor: LaborCosts,
        other: OtherCosts,
    ) -> Self {
        let total_costs_net = labor.cost + other.net;
        let total_costs_with_tax = total_costs_net + other.tax;

        let adjusted_revenue = revenue.invoiced - revenue.skonto;
        let adjusted_vendor = vendor.total - vendor.skonto;
        let profit_loss = adjusted_revenue - (adjusted_vendor + total_costs_net);

        Self {
            customer_invoiced_amount: revenue.invoiced,
            customer_paid_amount: revenue.paid,
            customer_outstanding_amount: revenue.invoiced - revenue.paid - revenue.skonto,
            customer_skonto_taken: revenue.skonto,
            vendor_bills_total: vendor.total,
            vendor_skonto_received: vendor.skonto,
            total_costs_net,
            total_costs_with_tax,
            profit_loss,
            negative_difference: (-profit_loss).max(Decimal::ZERO),
            total_hours_booked: labor.hours,
            labor_costs: labor.cost,
        }
    }

    /// Returns a copy with every amount rounded to `dp` decimal places.
    #[must_use]
    pub fn round_dp(&self, dp: u32) -> Self {
        Self {
            customer_invoiced_amount: self.customer_invoiced_amount.round_dp(dp),
            customer_paid_amount: self.customer_paid_amount.round_dp(dp),
            customer_outstanding_amount: self.customer_outstanding_amount.round_dp(dp),
            customer_skonto_taken: self.customer_skonto_taken.round_dp(dp),
            vendor_bills_total: self.vendor_bills_total.round_dp(dp),
            vendor_skonto_received: self.vendor_skonto_received.round_dp(dp),
            total_costs_net: self.total_costs_net.round_dp(dp),
            total_costs_with_tax: self.total_costs_with_tax.round_dp(dp),
            profit_loss: self.profit_loss.round_dp(dp),
            negative_difference: self.negative_difference.round_dp(dp),
            total_hours_booked: self.total_hours_booked.round_dp(dp),
            labor_costs: self.labor_costs.round_dp(dp),
        }
    }
}

/// Split of a contribution into ordinary payments and cash discounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settlement {
    /// Settled by payment.
    pub paid: Decimal,
    /// Settled by cash discount.
    pub skonto: Decimal,
}

impl AddAssign for Settlement {
    fn add_assign(&mut self, rhs: Self) {
        self.paid += rhs.paid;
        self.skonto += rhs.skonto;
    }
}

/// Customer side of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomerRevenue {
    /// Invoiced net of credit notes.
    pub invoiced: Decimal,
    /// Settled by payment.
    pub paid: Decimal,
    /// Cash discount granted.
    pub skonto: Decimal,
}

/// Vendor side of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VendorCosts {
    /// Billed net of vendor refunds.
    pub total: Decimal,
    /// Cash discount received.
    pub skonto: Decimal,
}

/// Timesheet totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaborCosts {
    /// Hours booked.
    pub hours: Decimal,
    /// Cost of those hours.
    pub cost: Decimal,
}

/// Costs booked directly on the cost center outside vendor bills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OtherCosts {
    /// Sum of the costs, excluding tax.
    pub net: Decimal,
    /// Tax on those costs.
    pub tax: Decimal,
}
