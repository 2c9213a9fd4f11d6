//! Record factories shared by the unit and property tests.

use kontor_shared::AnalyticsConfig;
use kontor_shared::types::{
    AccountId, AnalyticAccountId, AnalyticLineId, AnalyticPlanId, MoveId, MoveLineId,
    PartialReconcileId, ProjectId, TaxId,
};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::records::{
    Account, AccountType, AccountingSnapshot, AnalyticAccount, AnalyticLine, DisplayType, Move,
    MoveLine, MoveState, MoveType, PartialReconcile, Project, Tax, TaxAmountType,
};

/// Raw distribution `{ "<id>": pct, ... }`.
pub fn dist(entries: &[(AnalyticAccountId, u32)]) -> Value {
    let mut map = Map::new();
    for (account, percentage) in entries {
        map.insert(account.to_string(), Value::from(*percentage));
    }
    Value::Object(map)
}

/// Posted document of the given type, fully settled.
pub fn document(move_type: MoveType, total: Decimal) -> Move {
    Move {
        id: MoveId::new(),
        name: format!("{}/{}", move_type.as_str().to_uppercase(), MoveId::new()),
        move_type,
        state: MoveState::Posted,
        amount_total: total,
        amount_residual: Decimal::ZERO,
        reversed_entry_id: None,
    }
}

/// Posted customer invoice, fully settled.
pub fn customer_invoice(total: Decimal) -> Move {
    document(MoveType::OutInvoice, total)
}

/// Product line on `document`.
pub fn invoice_line(
    document: &Move,
    account_id: Option<AccountId>,
    price_total: Decimal,
    distribution: Option<Value>,
) -> MoveLine {
    MoveLine {
        id: MoveLineId::new(),
        move_id: document.id,
        account_id,
        display_type: DisplayType::Product,
        price_subtotal: price_total,
        price_total,
        tax_ids: Vec::new(),
        analytic_distribution: distribution,
    }
}

/// Ledger account with the given code and type.
pub fn ledger_account(code: &str, account_type: AccountType) -> Account {
    Account {
        id: AccountId::new(),
        code: code.to_string(),
        name: format!("Account {code}"),
        account_type,
    }
}

/// Handle on a document posted through [`Fixture::post`].
#[derive(Debug, Clone)]
pub struct Posted {
    pub document: Move,
    pub product_lines: Vec<MoveLine>,
    pub settlement_line: MoveLine,
}

/// A small ledger around one project and its cost center.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub plan: AnalyticPlanId,
    pub center: AnalyticAccount,
    pub project: Project,
    pub income: Account,
    pub expense: Account,
    pub receivable: Account,
    pub payable: Account,
    pub bank: Account,
    pub customer_discount: Account,
    pub vendor_discount: Account,
    pub settings: AnalyticsConfig,
    pub projects: Vec<Project>,
    pub analytic_accounts: Vec<AnalyticAccount>,
    pub moves: Vec<Move>,
    pub move_lines: Vec<MoveLine>,
    pub partials: Vec<PartialReconcile>,
    pub analytic_lines: Vec<AnalyticLine>,
    pub taxes: Vec<Tax>,
}

impl Fixture {
    pub fn new() -> Self {
        let plan = AnalyticPlanId::new();
        let center = AnalyticAccount {
            id: AnalyticAccountId::new(),
            name: "Project Alpha".to_string(),
            code: Some("PRJ-001".to_string()),
            plan_id: Some(plan),
        };
        let project = Project {
            id: ProjectId::new(),
            name: "Alpha".to_string(),
            partner_name: Some("ACME GmbH".to_string()),
            user_name: Some("Mitchell Admin".to_string()),
            account_id: Some(center.id),
            analytic_account_id: None,
        };

        Self {
            plan,
            center: center.clone(),
            project: project.clone(),
            income: ledger_account("8400", AccountType::Income),
            expense: ledger_account("3400", AccountType::Expense),
            receivable: ledger_account("1400", AccountType::AssetReceivable),
            payable: ledger_account("1600", AccountType::LiabilityPayable),
            bank: ledger_account("1200", AccountType::AssetCash),
            customer_discount: ledger_account("8736", AccountType::Expense),
            vendor_discount: ledger_account("3736", AccountType::Income),
            settings: AnalyticsConfig::default(),
            projects: vec![project],
            analytic_accounts: vec![center],
            moves: Vec::new(),
            move_lines: Vec::new(),
            partials: Vec::new(),
            analytic_lines: Vec::new(),
            taxes: Vec::new(),
        }
    }

    /// Adds another cost center on the same plan.
    pub fn add_center(&mut self, name: &str) -> AnalyticAccountId {
        let center = AnalyticAccount {
            id: AnalyticAccountId::new(),
            name: name.to_string(),
            code: None,
            plan_id: Some(self.plan),
        };
        let id = center.id;
        self.analytic_accounts.push(center);
        id
    }

    /// Posts a document with one product line per `(price_total, distribution)`.
    ///
    /// The document total is the sum of the line totals. A receivable or
    /// payable line carries the settlement side.
    pub fn post(&mut self, move_type: MoveType, lines: &[(Decimal, Value)]) -> Posted {
        let total: Decimal = lines.iter().map(|(amount, _)| *amount).sum();
        let document = document(move_type, total);

        let product_account = if move_type.is_customer_document() {
            self.income.id
        } else {
            self.expense.id
        };
        let settlement_account = if move_type.is_customer_document() {
            self.receivable.id
        } else {
            self.payable.id
        };

        let product_lines: Vec<MoveLine> = lines
            .iter()
            .map(|(amount, distribution)| {
                invoice_line(
                    &document,
                    Some(product_account),
                    *amount,
                    Some(distribution.clone()),
                )
            })
            .collect();
        let settlement_line = MoveLine {
            id: MoveLineId::new(),
            move_id: document.id,
            account_id: Some(settlement_account),
            display_type: DisplayType::PaymentTerm,
            price_subtotal: -total,
            price_total: -total,
            tax_ids: Vec::new(),
            analytic_distribution: None,
        };

        self.moves.push(document.clone());
        self.move_lines.extend(product_lines.iter().cloned());
        self.move_lines.push(settlement_line.clone());

        Posted {
            document,
            product_lines,
            settlement_line,
        }
    }

    /// Sets the residual of a posted document.
    pub fn set_residual(&mut self, document: MoveId, residual: Decimal) {
        if let Some(found) = self.moves.iter_mut().find(|m| m.id == document) {
            found.amount_residual = residual;
        }
    }

    /// Settles `amount` of a document against a bank or discount account.
    pub fn settle(&mut self, posted: &Posted, amount: Decimal, account_id: AccountId) {
        let payment = document(MoveType::Entry, amount);
        let counterpart = MoveLine {
            id: MoveLineId::new(),
            move_id: payment.id,
            account_id: Some(account_id),
            display_type: DisplayType::Product,
            price_subtotal: amount,
            price_total: amount,
            tax_ids: Vec::new(),
            analytic_distribution: None,
        };

        let (debit, credit) = if posted.document.move_type.is_customer_document() {
            (posted.settlement_line.id, counterpart.id)
        } else {
            (counterpart.id, posted.settlement_line.id)
        };
        self.partials.push(PartialReconcile {
            id: PartialReconcileId::new(),
            debit_move_line_id: debit,
            credit_move_line_id: credit,
            amount,
        });
        self.moves.push(payment);
        self.move_lines.push(counterpart);
    }

    /// Posts the exact reversal of a document.
    pub fn reverse(&mut self, posted: &Posted) -> Move {
        let reversal_type = match posted.document.move_type {
            MoveType::OutInvoice => MoveType::OutRefund,
            MoveType::OutRefund => MoveType::OutInvoice,
            MoveType::InInvoice => MoveType::InRefund,
            MoveType::InRefund => MoveType::InInvoice,
            other => other,
        };
        let lines: Vec<(Decimal, Value)> = posted
            .product_lines
            .iter()
            .map(|l| {
                (
                    l.price_total,
                    l.analytic_distribution.clone().unwrap_or(Value::Null),
                )
            })
            .collect();
        let reversal = self.post(reversal_type, &lines);

        let mut reversal_move = reversal.document;
        reversal_move.reversed_entry_id = Some(posted.document.id);
        if let Some(found) = self.moves.iter_mut().find(|m| m.id == reversal_move.id) {
            found.reversed_entry_id = Some(posted.document.id);
        }
        reversal_move
    }

    /// Books a timesheet entry on the fixture's cost center.
    pub fn timesheet(&mut self, hours: Decimal, amount: Decimal, project: Option<ProjectId>) {
        self.analytic_lines.push(AnalyticLine {
            id: AnalyticLineId::new(),
            account_id: self.center.id,
            project_id: project,
            is_timesheet: true,
            unit_amount: hours,
            amount,
            move_line_id: None,
        });
    }

    /// Books a non-timesheet analytic line, optionally originating from a move line.
    pub fn cost(&mut self, amount: Decimal, origin: Option<MoveLineId>) {
        self.analytic_lines.push(AnalyticLine {
            id: AnalyticLineId::new(),
            account_id: self.center.id,
            project_id: None,
            is_timesheet: false,
            unit_amount: Decimal::ONE,
            amount,
            move_line_id: origin,
        });
    }

    /// Posts a miscellaneous entry with one taxed expense line and books its cost.
    pub fn taxed_cost(&mut self, amount: Decimal, taxes: &[(TaxAmountType, Decimal)]) {
        let entry = document(MoveType::Entry, amount);
        let tax_ids = taxes
            .iter()
            .map(|(amount_type, rate)| {
                let tax = Tax {
                    id: TaxId::new(),
                    name: format!("{} {rate}", amount_type.as_str()),
                    amount_type: *amount_type,
                    amount: *rate,
                };
                let id = tax.id;
                self.taxes.push(tax);
                id
            })
            .collect();
        let line = MoveLine {
            id: MoveLineId::new(),
            move_id: entry.id,
            account_id: Some(self.expense.id),
            display_type: DisplayType::Product,
            price_subtotal: amount,
            price_total: amount,
            tax_ids,
            analytic_distribution: Some(dist(&[(self.center.id, 100)])),
        };
        let line_id = line.id;
        self.moves.push(entry);
        self.move_lines.push(line);
        self.cost(-amount, Some(line_id));
    }

    pub fn snapshot(&self) -> AccountingSnapshot {
        AccountingSnapshot::builder()
            .projects(self.projects.clone())
            .analytic_accounts(self.analytic_accounts.clone())
            .accounts([
                self.income.clone(),
                self.expense.clone(),
                self.receivable.clone(),
                self.payable.clone(),
                self.bank.clone(),
                self.customer_discount.clone(),
                self.vendor_discount.clone(),
            ])
            .moves(self.moves.clone())
            .move_lines(self.move_lines.clone())
            .partial_reconciles(self.partials.clone())
            .analytic_lines(self.analytic_lines.clone())
            .taxes(self.taxes.clone())
            .build()
    }
}
