//! Loads the host records a project computation reads.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use kontor_core::records::{
    Account, AccountType, AccountingSnapshot, AnalyticAccount, AnalyticLine, DisplayType, Move,
    MoveLine, MoveState, MoveType, PartialReconcile, Project, Tax, TaxAmountType,
};
use kontor_shared::types::{AnalyticAccountId, TaxId};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::entities::{
    accounts, analytic_accounts, analytic_lines, move_line_taxes, move_lines, moves,
    partial_reconciles, taxes,
};

/// Loads the projects' cost centers with every document line distributed to
/// them, the documents' settlement lines and reconciliations, the centers'
/// analytic lines, and the accounts and taxes those records reference.
pub(crate) async fn load_snapshot<C: ConnectionTrait>(
    conn: &C,
    projects: Vec<Project>,
) -> Result<AccountingSnapshot, DbErr> {
    let centers: Vec<Uuid> = projects
        .iter()
        .flat_map(|p| [p.account_id, p.analytic_account_id])
        .flatten()
        .map(AnalyticAccountId::into_inner)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if centers.is_empty() {
        return Ok(AccountingSnapshot::builder().projects(projects).build());
    }

    let analytic_accounts = analytic_accounts::Entity::find()
        .filter(analytic_accounts::Column::Id.is_in(centers.clone()))
        .all(conn)
        .await?;

    // Text match narrows the candidates; keys are decoded exactly later.
    let mut mentions_center = Condition::any();
    for center in &centers {
        mentions_center = mentions_center.add(Expr::cust_with_values(
            "move_lines.analytic_distribution::text LIKE ?",
            [format!("%{center}%")],
        ));
    }
    let mut lines: HashMap<Uuid, move_lines::Model> = move_lines::Entity::find()
        .filter(move_lines::Column::AnalyticDistribution.is_not_null())
        .filter(mentions_center)
        .all(conn)
        .await?
        .into_iter()
        .map(|line| (line.id, line))
        .collect();

    let analytic_lines = analytic_lines::Entity::find()
        .filter(analytic_lines::Column::AccountId.is_in(centers))
        .all(conn)
        .await?;
    let origins = missing(
        analytic_lines.iter().filter_map(|l| l.move_line_id),
        &lines,
    );
    extend_lines(conn, &mut lines, origins).await?;

    let document_ids: BTreeSet<Uuid> = lines.values().map(|l| l.move_id).collect();
    let mut documents: HashMap<Uuid, moves::Model> = HashMap::new();
    if !document_ids.is_empty() {
        let condition = Condition::any()
            .add(moves::Column::Id.is_in(document_ids.clone()))
            .add(moves::Column::ReversedEntryId.is_in(document_ids.clone()));
        documents.extend(
            moves::Entity::find()
                .filter(condition)
                .all(conn)
                .await?
                .into_iter()
                .map(|m| (m.id, m)),
        );

        let settlement_lines = move_lines::Entity::find()
            .filter(move_lines::Column::MoveId.is_in(documents.keys().copied()))
            .all(conn)
            .await?;
        for line in settlement_lines {
            lines.entry(line.id).or_insert(line);
        }
    }

    let line_ids: Vec<Uuid> = lines.keys().copied().collect();
    let partials = if line_ids.is_empty() {
        Vec::new()
    } else {
        partial_reconciles::Entity::find()
            .filter(
                Condition::any()
                    .add(partial_reconciles::Column::DebitMoveLineId.is_in(line_ids.clone()))
                    .add(partial_reconciles::Column::CreditMoveLineId.is_in(line_ids.clone())),
            )
            .all(conn)
            .await?
    };
    let counterparts = missing(
        partials
            .iter()
            .flat_map(|p| [p.debit_move_line_id, p.credit_move_line_id]),
        &lines,
    );
    extend_lines(conn, &mut lines, counterparts).await?;

    let account_ids: BTreeSet<Uuid> = lines.values().filter_map(|l| l.account_id).collect();
    let accounts = if account_ids.is_empty() {
        Vec::new()
    } else {
        accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(account_ids))
            .all(conn)
            .await?
    };

    let tax_links = if lines.is_empty() {
        Vec::new()
    } else {
        move_line_taxes::Entity::find()
            .filter(move_line_taxes::Column::MoveLineId.is_in(lines.keys().copied()))
            .all(conn)
            .await?
    };
    let tax_ids: BTreeSet<Uuid> = tax_links.iter().map(|link| link.tax_id).collect();
    let taxes = if tax_ids.is_empty() {
        Vec::new()
    } else {
        taxes::Entity::find()
            .filter(taxes::Column::Id.is_in(tax_ids))
            .all(conn)
            .await?
    };

    let mut taxes_by_line: HashMap<Uuid, Vec<TaxId>> = HashMap::new();
    for link in tax_links {
        taxes_by_line
            .entry(link.move_line_id)
            .or_default()
            .push(link.tax_id.into());
    }

    debug!(
        projects = projects.len(),
        move_lines = lines.len(),
        moves = documents.len(),
        partials = partials.len(),
        analytic_lines = analytic_lines.len(),
        "Loaded accounting snapshot"
    );

    Ok(AccountingSnapshot::builder()
        .projects(projects)
        .analytic_accounts(analytic_accounts.into_iter().map(to_analytic_account))
        .accounts(accounts.into_iter().filter_map(to_account))
        .moves(documents.into_values().filter_map(to_move))
        .move_lines(
            lines
                .into_values()
                .filter_map(|line| {
                    let tax_ids = taxes_by_line.remove(&line.id).unwrap_or_default();
                    to_move_line(line, tax_ids)
                }),
        )
        .partial_reconciles(partials.into_iter().map(to_partial))
        .analytic_lines(analytic_lines.into_iter().map(to_analytic_line))
        .taxes(taxes.into_iter().filter_map(to_tax))
        .build())
}

/// Loads the analytic accounts with the given IDs.
pub(crate) async fn find_analytic_accounts<C: ConnectionTrait>(
    conn: &C,
    ids: &[AnalyticAccountId],
) -> Result<Vec<AnalyticAccount>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    Ok(analytic_accounts::Entity::find()
        .filter(analytic_accounts::Column::Id.is_in(ids.iter().map(|id| id.into_inner())))
        .all(conn)
        .await?
        .into_iter()
        .map(to_analytic_account)
        .collect())
}

fn missing(
    ids: impl Iterator<Item = Uuid>,
    loaded: &HashMap<Uuid, move_lines::Model>,
) -> BTreeSet<Uuid> {
    ids.filter(|id| !loaded.contains_key(id)).collect()
}

async fn extend_lines<C: ConnectionTrait>(
    conn: &C,
    lines: &mut HashMap<Uuid, move_lines::Model>,
    ids: BTreeSet<Uuid>,
) -> Result<(), DbErr> {
    if ids.is_empty() {
        return Ok(());
    }

    let found = move_lines::Entity::find()
        .filter(move_lines::Column::Id.is_in(ids))
        .all(conn)
        .await?;
    for line in found {
        lines.entry(line.id).or_insert(line);
    }
    Ok(())
}

/// Parses a host selection value, logging and rejecting unknown values.
fn selection<T: FromStr>(value: &str, table: &'static str, id: Uuid) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match T::from_str(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(table, id = %id, error = %err, "Skipping record with unknown selection value");
            None
        }
    }
}

fn to_analytic_account(model: analytic_accounts::Model) -> AnalyticAccount {
    AnalyticAccount {
        id: model.id.into(),
        name: model.name,
        code: model.code,
        plan_id: model.plan_id.map(Into::into),
    }
}

fn to_account(model: accounts::Model) -> Option<Account> {
    let account_type: AccountType = selection(&model.account_type, "accounts", model.id)?;
    Some(Account {
        id: model.id.into(),
        code: model.code,
        name: model.name,
        account_type,
    })
}

fn to_move(model: moves::Model) -> Option<Move> {
    let move_type: MoveType = selection(&model.move_type, "moves", model.id)?;
    let state: MoveState = selection(&model.state, "moves", model.id)?;
    Some(Move {
        id: model.id.into(),
        name: model.name,
        move_type,
        state,
        amount_total: model.amount_total,
        amount_residual: model.amount_residual,
        reversed_entry_id: model.reversed_entry_id.map(Into::into),
    })
}

fn to_move_line(model: move_lines::Model, tax_ids: Vec<TaxId>) -> Option<MoveLine> {
    let display_type: DisplayType = selection(&model.display_type, "move_lines", model.id)?;
    Some(MoveLine {
        id: model.id.into(),
        move_id: model.move_id.into(),
        account_id: model.account_id.map(Into::into),
        display_type,
        price_subtotal: model.price_subtotal,
        price_total: model.price_total,
        tax_ids,
        analytic_distribution: model.analytic_distribution,
    })
}

fn to_partial(model: partial_reconciles::Model) -> PartialReconcile {
    PartialReconcile {
        id: model.id.into(),
        debit_move_line_id: model.debit_move_line_id.into(),
        credit_move_line_id: model.credit_move_line_id.into(),
        amount: model.amount,
    }
}

fn to_analytic_line(model: analytic_lines::Model) -> AnalyticLine {
    AnalyticLine {
        id: model.id.into(),
        account_id: model.account_id.into(),
        project_id: model.project_id.map(Into::into),
        is_timesheet: model.is_timesheet,
        unit_amount: model.unit_amount,
        amount: model.amount,
        move_line_id: model.move_line_id.map(Into::into),
    }
}

fn to_tax(model: taxes::Model) -> Option<Tax> {
    let amount_type: TaxAmountType = selection(&model.amount_type, "taxes", model.id)?;
    Some(Tax {
        id: model.id.into(),
        name: model.name,
        amount_type,
        amount: model.amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::{Map, Value, json};

    fn move_model(move_type: &str, state: &str) -> moves::Model {
        moves::Model {
            id: Uuid::new_v4(),
            name: "INV/2026/0001".to_string(),
            move_type: move_type.to_string(),
            state: state.to_string(),
            amount_total: dec!(1190),
            amount_residual: dec!(0),
            reversed_entry_id: None,
        }
    }

    #[test]
    fn test_move_selections_are_parsed() {
        let model = move_model("out_invoice", "posted");
        let id = model.id;

        let parsed = to_move(model).unwrap();

        assert_eq!(parsed.id.into_inner(), id);
        assert_eq!(parsed.move_type, MoveType::OutInvoice);
        assert!(parsed.is_posted());
        assert_eq!(parsed.amount_total, dec!(1190));
    }

    #[test]
    fn test_unknown_selections_are_rejected() {
        assert!(to_move(move_model("out_voucher", "posted")).is_none());
        assert!(to_move(move_model("in_invoice", "archived")).is_none());

        let tax = taxes::Model {
            id: Uuid::new_v4(),
            name: "Eco fee".to_string(),
            amount_type: "code".to_string(),
            amount: dec!(1),
        };
        assert!(to_tax(tax).is_none());
    }

    #[test]
    fn test_move_line_keeps_raw_distribution_and_taxes() {
        let center = Uuid::new_v4();
        let tax = TaxId::new();
        let model = move_lines::Model {
            id: Uuid::new_v4(),
            move_id: Uuid::new_v4(),
            account_id: None,
            display_type: "line_note".to_string(),
            price_subtotal: dec!(0),
            price_total: dec!(0),
            analytic_distribution: Some(Value::Object(Map::from_iter([(
                center.to_string(),
                json!(100),
            )]))),
        };

        let line = to_move_line(model, vec![tax]).unwrap();

        assert_eq!(line.display_type, DisplayType::LineNote);
        assert_eq!(line.tax_ids, vec![tax]);
        assert!(line.analytic_distribution.is_some());
    }

    #[test]
    fn test_missing_filters_loaded_lines() {
        let loaded_id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut loaded = HashMap::new();
        loaded.insert(
            loaded_id,
            move_lines::Model {
                id: loaded_id,
                move_id: Uuid::new_v4(),
                account_id: None,
                display_type: "product".to_string(),
                price_subtotal: dec!(1),
                price_total: dec!(1),
                analytic_distribution: None,
            },
        );

        let result = missing([loaded_id, other, other].into_iter(), &loaded);

        assert_eq!(result, BTreeSet::from([other]));
    }
}
