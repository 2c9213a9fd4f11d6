//! Indexed, read-only view of the host records used by one computation.

use std::collections::{HashMap, HashSet};

use kontor_shared::types::{AccountId, AnalyticAccountId, MoveId, MoveLineId, ProjectId, TaxId};
use tracing::warn;

use super::types::{
    Account, AnalyticAccount, AnalyticLine, Move, MoveLine, PartialReconcile, Project, Tax,
};
use crate::distribution::DistributionMap;

/// Collects host records before indexing them into an [`AccountingSnapshot`].
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    projects: Vec<Project>,
    analytic_accounts: Vec<AnalyticAccount>,
    accounts: Vec<Account>,
    moves: Vec<Move>,
    move_lines: Vec<MoveLine>,
    partial_reconciles: Vec<PartialReconcile>,
    analytic_lines: Vec<AnalyticLine>,
    taxes: Vec<Tax>,
}

impl SnapshotBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds projects.
    #[must_use]
    pub fn projects(mut self, projects: impl IntoIterator<Item = Project>) -> Self {
        self.projects.extend(projects);
        self
    }

    /// Adds analytic accounts.
    #[must_use]
    pub fn analytic_accounts(
        mut self,
        accounts: impl IntoIterator<Item = AnalyticAccount>,
    ) -> Self {
        self.analytic_accounts.extend(accounts);
        self
    }

    /// Adds ledger accounts.
    #[must_use]
    pub fn accounts(mut self, accounts: impl IntoIterator<Item = Account>) -> Self {
        self.accounts.extend(accounts);
        self
    }

    /// Adds moves.
    #[must_use]
    pub fn moves(mut self, moves: impl IntoIterator<Item = Move>) -> Self {
        self.moves.extend(moves);
        self
    }

    /// Adds move lines.
    #[must_use]
    pub fn move_lines(mut self, lines: impl IntoIterator<Item = MoveLine>) -> Self {
        self.move_lines.extend(lines);
        self
    }

    /// Adds partial reconciliations.
    #[must_use]
    pub fn partial_reconciles(
        mut self,
        partials: impl IntoIterator<Item = PartialReconcile>,
    ) -> Self {
        self.partial_reconciles.extend(partials);
        self
    }

    /// Adds analytic lines.
    #[must_use]
    pub fn analytic_lines(mut self, lines: impl IntoIterator<Item = AnalyticLine>) -> Self {
        self.analytic_lines.extend(lines);
        self
    }

    /// Adds taxes.
    #[must_use]
    pub fn taxes(mut self, taxes: impl IntoIterator<Item = Tax>) -> Self {
        self.taxes.extend(taxes);
        self
    }

    /// Indexes the collected records.
    ///
    /// Analytic distributions are decoded here, once per line. A line whose
    /// distribution cannot be decoded is logged and behaves as if it had none.
    #[must_use]
    pub fn build(self) -> AccountingSnapshot {
        let mut distributions = HashMap::new();
        let mut line_index = HashMap::with_capacity(self.move_lines.len());
        let mut lines_by_move: HashMap<MoveId, Vec<usize>> = HashMap::new();

        for (idx, line) in self.move_lines.iter().enumerate() {
            line_index.insert(line.id, idx);
            lines_by_move.entry(line.move_id).or_default().push(idx);

            let Some(raw) = line.analytic_distribution.as_ref().filter(|v| !v.is_null()) else {
                continue;
            };
            match DistributionMap::decode(raw) {
                Ok(map) if !map.is_empty() => {
                    distributions.insert(line.id, map);
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(
                        move_line_id = %line.id,
                        move_id = %line.move_id,
                        error = %err,
                        "Skipping move line with malformed analytic distribution"
                    );
                }
            }
        }

        let mut partials_by_line: HashMap<MoveLineId, Vec<usize>> = HashMap::new();
        for (idx, partial) in self.partial_reconciles.iter().enumerate() {
            partials_by_line
                .entry(partial.debit_move_line_id)
                .or_default()
                .push(idx);
            partials_by_line
                .entry(partial.credit_move_line_id)
                .or_default()
                .push(idx);
        }

        // Only a posted reversal voids the original document.
        let reversed_moves = self
            .moves
            .iter()
            .filter(|m| m.is_posted())
            .filter_map(|m| m.reversed_entry_id)
            .collect();

        AccountingSnapshot {
            projects: self.projects,
            analytic_accounts: self
                .analytic_accounts
                .into_iter()
                .map(|a| (a.id, a))
                .collect(),
            accounts: self.accounts.into_iter().map(|a| (a.id, a)).collect(),
            moves: self.moves.into_iter().map(|m| (m.id, m)).collect(),
            move_lines: self.move_lines,
            line_index,
            lines_by_move,
            partial_reconciles: self.partial_reconciles,
            partials_by_line,
            analytic_lines: self.analytic_lines,
            taxes: self.taxes.into_iter().map(|t| (t.id, t)).collect(),
            reversed_moves,
            distributions,
        }
    }
}

/// Read-only view of the host records relevant to one or more projects.
#[derive(Debug, Default)]
pub struct AccountingSnapshot {
    projects: Vec<Project>,
    analytic_accounts: HashMap<AnalyticAccountId, AnalyticAccount>,
    accounts: HashMap<AccountId, Account>,
    moves: HashMap<MoveId, Move>,
    move_lines: Vec<MoveLine>,
    line_index: HashMap<MoveLineId, usize>,
    lines_by_move: HashMap<MoveId, Vec<usize>>,
    partial_reconciles: Vec<PartialReconcile>,
    partials_by_line: HashMap<MoveLineId, Vec<usize>>,
    analytic_lines: Vec<AnalyticLine>,
    taxes: HashMap<TaxId, Tax>,
    reversed_moves: HashSet<MoveId>,
    distributions: HashMap<MoveLineId, DistributionMap>,
}

impl AccountingSnapshot {
    /// Starts a new builder.
    #[must_use]
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    /// All projects in the snapshot.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Looks up a project.
    #[must_use]
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Projects referencing the cost center through either reference field.
    pub fn projects_for_account(
        &self,
        account_id: AnalyticAccountId,
    ) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(move |p| {
            p.account_id == Some(account_id) || p.analytic_account_id == Some(account_id)
        })
    }

    /// Looks up an analytic account.
    #[must_use]
    pub fn analytic_account(&self, id: AnalyticAccountId) -> Option<&AnalyticAccount> {
        self.analytic_accounts.get(&id)
    }

    /// Looks up a ledger account.
    #[must_use]
    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// Ledger account of a move line.
    #[must_use]
    pub fn account_of(&self, line: &MoveLine) -> Option<&Account> {
        line.account_id.and_then(|id| self.account(id))
    }

    /// Looks up a move.
    #[must_use]
    pub fn move_by_id(&self, id: MoveId) -> Option<&Move> {
        self.moves.get(&id)
    }

    /// All move lines, in load order.
    #[must_use]
    pub fn move_lines(&self) -> &[MoveLine] {
        &self.move_lines
    }

    /// Looks up a move line.
    #[must_use]
    pub fn move_line(&self, id: MoveLineId) -> Option<&MoveLine> {
        self.line_index.get(&id).map(|&idx| &self.move_lines[idx])
    }

    /// Lines belonging to a move.
    pub fn lines_of_move(&self, move_id: MoveId) -> impl Iterator<Item = &MoveLine> {
        self.lines_by_move
            .get(&move_id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.move_lines[idx])
    }

    /// Partial reconciliations touching a line on either side.
    pub fn partials_for_line(
        &self,
        line_id: MoveLineId,
    ) -> impl Iterator<Item = &PartialReconcile> {
        self.partials_by_line
            .get(&line_id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.partial_reconciles[idx])
    }

    /// Analytic lines booked on a cost center.
    pub fn analytic_lines_for(
        &self,
        account_id: AnalyticAccountId,
    ) -> impl Iterator<Item = &AnalyticLine> {
        self.analytic_lines
            .iter()
            .filter(move |l| l.account_id == account_id)
    }

    /// Looks up a tax.
    #[must_use]
    pub fn tax(&self, id: TaxId) -> Option<&Tax> {
        self.taxes.get(&id)
    }

    /// Returns true if a posted move reverses `move_id`.
    #[must_use]
    pub fn is_reversed(&self, move_id: MoveId) -> bool {
        self.reversed_moves.contains(&move_id)
    }

    /// Decoded, non-empty analytic distribution of a move line.
    #[must_use]
    pub fn distribution(&self, line_id: MoveLineId) -> Option<&DistributionMap> {
        self.distributions.get(&line_id)
    }
}
