//! Project repository for project lookups and computed-field writes.

use kontor_core::financials::ProjectFinancials;
use kontor_core::records::Project;
use kontor_shared::types::{AnalyticAccountId, ProjectId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::projects;

/// Project repository.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    /// Creates a new project repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Most recently created projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_recent(&self, limit: u64) -> Result<Vec<Project>, DbErr> {
        Ok(projects::Entity::find()
            .order_by_desc(projects::Column::CreatedAt)
            .order_by_desc(projects::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_project)
            .collect())
    }

    /// Projects referencing any of the cost centers through either reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_analytic_accounts(
        &self,
        accounts: &[AnalyticAccountId],
    ) -> Result<Vec<Project>, DbErr> {
        find_by_analytic_accounts(&self.db, accounts).await
    }

    /// Reads back the stored financial figures of a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_financials(&self, id: ProjectId) -> Result<Option<ProjectFinancials>, DbErr> {
        Ok(projects::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(|model| to_financials(&model)))
    }
}

pub(crate) async fn find_by_ids<C: ConnectionTrait>(
    conn: &C,
    ids: &[ProjectId],
) -> Result<Vec<Project>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    Ok(projects::Entity::find()
        .filter(projects::Column::Id.is_in(ids.iter().map(|id| id.into_inner())))
        .order_by_asc(projects::Column::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(to_project)
        .collect())
}

pub(crate) async fn find_by_analytic_accounts<C: ConnectionTrait>(
    conn: &C,
    accounts: &[AnalyticAccountId],
) -> Result<Vec<Project>, DbErr> {
    if accounts.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<_> = accounts.iter().map(|id| id.into_inner()).collect();
    Ok(projects::Entity::find()
        .filter(
            Condition::any()
                .add(projects::Column::AccountId.is_in(ids.clone()))
                .add(projects::Column::AnalyticAccountId.is_in(ids)),
        )
        .order_by_asc(projects::Column::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(to_project)
        .collect())
}

/// Writes the computed figures of a project, rounded to cents, and returns
/// what was written.
pub(crate) async fn store_financials<C: ConnectionTrait>(
    conn: &C,
    id: ProjectId,
    financials: &ProjectFinancials,
) -> Result<ProjectFinancials, DbErr> {
    let f = financials.round_dp(2);

    projects::ActiveModel {
        id: Set(id.into_inner()),
        customer_invoiced_amount: Set(f.customer_invoiced_amount),
        customer_paid_amount: Set(f.customer_paid_amount),
        customer_outstanding_amount: Set(f.customer_outstanding_amount),
        customer_skonto_taken: Set(f.customer_skonto_taken),
        vendor_bills_total: Set(f.vendor_bills_total),
        vendor_skonto_received: Set(f.vendor_skonto_received),
        total_costs_net: Set(f.total_costs_net),
        total_costs_with_tax: Set(f.total_costs_with_tax),
        profit_loss: Set(f.profit_loss),
        negative_difference: Set(f.negative_difference),
        total_hours_booked: Set(f.total_hours_booked),
        labor_costs: Set(f.labor_costs),
        ..Default::default()
    }
    .update(conn)
    .await?;

    Ok(f)
}

pub(crate) fn to_project(model: projects::Model) -> Project {
    Project {
        id: model.id.into(),
        name: model.name,
        partner_name: model.partner_name,
        user_name: model.user_name,
        account_id: model.account_id.map(Into::into),
        analytic_account_id: model.analytic_account_id.map(Into::into),
    }
}

fn to_financials(model: &projects::Model) -> ProjectFinancials {
    ProjectFinancials {
        customer_invoiced_amount: model.customer_invoiced_amount,
        customer_paid_amount: model.customer_paid_amount,
        customer_outstanding_amount: model.customer_outstanding_amount,
        customer_skonto_taken: model.customer_skonto_taken,
        vendor_bills_total: model.vendor_bills_total,
        vendor_skonto_received: model.vendor_skonto_received,
        total_costs_net: model.total_costs_net,
        total_costs_with_tax: model.total_costs_with_tax,
        profit_loss: model.profit_loss,
        negative_difference: model.negative_difference,
        total_hours_booked: model.total_hours_booked,
        labor_costs: model.labor_costs,
    }
}
