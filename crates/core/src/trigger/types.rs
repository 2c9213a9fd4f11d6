//! Accounting line change events.

use kontor_shared::types::MoveLineId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field of an accounting line touched by an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineField {
    /// `analytic_distribution`.
    AnalyticDistribution,
    /// `price_subtotal`.
    PriceSubtotal,
    /// `debit`.
    Debit,
    /// `credit`.
    Credit,
    /// `balance`.
    Balance,
    /// Any field that does not affect project figures.
    Other,
}

impl LineField {
    /// Returns true if a change to this field can alter project figures.
    #[must_use]
    pub fn triggers_recompute(self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// What happened to an accounting line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Line was created.
    Created,
    /// Line was updated; lists the touched fields.
    Updated(Vec<LineField>),
    /// Line was deleted.
    Deleted,
}

impl ChangeKind {
    /// Returns true if the change can alter project figures.
    #[must_use]
    pub fn triggers_recompute(&self) -> bool {
        match self {
            Self::Created | Self::Deleted => true,
            Self::Updated(fields) => fields.iter().any(|field| field.triggers_recompute()),
        }
    }
}

/// A created, updated or deleted accounting line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChange {
    /// Changed line.
    pub line_id: MoveLineId,
    /// Kind of change.
    pub kind: ChangeKind,
    /// Raw analytic distribution of the line (before deletion for deletes).
    pub analytic_distribution: Option<Value>,
}

impl LineChange {
    /// A newly created line.
    #[must_use]
    pub fn created(line_id: MoveLineId, analytic_distribution: Option<Value>) -> Self {
        Self {
            line_id,
            kind: ChangeKind::Created,
            analytic_distribution,
        }
    }

    /// An updated line and the fields the update touched.
    #[must_use]
    pub fn updated(
        line_id: MoveLineId,
        fields: Vec<LineField>,
        analytic_distribution: Option<Value>,
    ) -> Self {
        Self {
            line_id,
            kind: ChangeKind::Updated(fields),
            analytic_distribution,
        }
    }

    /// A deleted line, with the distribution it had before deletion.
    #[must_use]
    pub fn deleted(line_id: MoveLineId, analytic_distribution: Option<Value>) -> Self {
        Self {
            line_id,
            kind: ChangeKind::Deleted,
            analytic_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![LineField::AnalyticDistribution], true)]
    #[case(vec![LineField::PriceSubtotal], true)]
    #[case(vec![LineField::Debit], true)]
    #[case(vec![LineField::Credit], true)]
    #[case(vec![LineField::Balance], true)]
    #[case(vec![LineField::Other, LineField::Balance], true)]
    #[case(vec![LineField::Other], false)]
    #[case(vec![], false)]
    fn test_update_trigger_filter(#[case] fields: Vec<LineField>, #[case] expected: bool) {
        assert_eq!(ChangeKind::Updated(fields).triggers_recompute(), expected);
    }

    #[test]
    fn test_create_and_delete_always_trigger() {
        assert!(ChangeKind::Created.triggers_recompute());
        assert!(ChangeKind::Deleted.triggers_recompute());
    }
}
