use std::collections::BTreeSet;

use anyhow::{Context as _, anyhow};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionTrait, sea_query::OnConflict,
};
use serde_json::Value;

use crewdir_accounts_schema::accounts;
use crewdir_domain::account::{Account, Admin, CompanyOwner, Employee, Role};
use crewdir_domain::id::AccountId;

use crate::domain::repository::AccountDirectory;
use crate::error::AccountsServiceError;

// ── Account directory ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountDirectory {
    pub db: DatabaseConnection,
}

impl AccountDirectory for DbAccountDirectory {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountsServiceError> {
        let model = accounts::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find account by id")?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<Account>, AccountsServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::ExternalId.eq(external_id))
            .one(&self.db)
            .await
            .context("find account by external id")?;
        model.map(account_from_model).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountsServiceError> {
        accounts::Entity::find()
            .all(&self.db)
            .await
            .context("list accounts")?
            .into_iter()
            .map(account_from_model)
            .collect()
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<Account>, AccountsServiceError> {
        accounts::Entity::find()
            .filter(accounts::Column::Role.eq(role.as_u8() as i16))
            .all(&self.db)
            .await
            .context("list accounts by role")?
            .into_iter()
            .map(account_from_model)
            .collect()
    }

    async fn insert_if_absent(
        &self,
        account: &Account,
    ) -> Result<Account, AccountsServiceError> {
        let external_id = account.external_id().ok_or_else(|| {
            AccountsServiceError::Internal(anyhow!("conditional insert requires an external id"))
        })?;

        let insert = accounts::Entity::insert(account_to_model(account))
            .on_conflict(
                OnConflict::column(accounts::Column::ExternalId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.db)
            .await;
        match insert {
            // RecordNotInserted means we lost the race; read the winner.
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => Err(e).context("insert account if absent")?,
        }

        self.find_by_external_id(external_id).await?.ok_or_else(|| {
            AccountsServiceError::Internal(anyhow!("account missing after conditional insert"))
        })
    }

    async fn upsert(&self, account: &Account) -> Result<(), AccountsServiceError> {
        upsert_on(&self.db, account).await
    }

    async fn upsert_pair(
        &self,
        first: &Account,
        second: &Account,
    ) -> Result<(), AccountsServiceError> {
        let txn = self.db.begin().await.context("begin pair upsert")?;
        upsert_on(&txn, first).await?;
        upsert_on(&txn, second).await?;
        txn.commit().await.context("commit pair upsert")?;
        Ok(())
    }

    async fn delete(&self, id: AccountId) -> Result<(), AccountsServiceError> {
        accounts::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete account")?;
        Ok(())
    }

    async fn delete_with_upsert(
        &self,
        id: AccountId,
        companion: &Account,
    ) -> Result<(), AccountsServiceError> {
        let txn = self.db.begin().await.context("begin delete with upsert")?;
        accounts::Entity::delete_by_id(id.0)
            .exec(&txn)
            .await
            .context("delete account")?;
        upsert_on(&txn, companion).await?;
        txn.commit().await.context("commit delete with upsert")?;
        Ok(())
    }
}

/// Insert-or-update on the primary key. `external_id`, `role`, and
/// `created_at` are immutable and never touched on conflict.
async fn upsert_on<C: ConnectionTrait>(
    conn: &C,
    account: &Account,
) -> Result<(), AccountsServiceError> {
    accounts::Entity::insert(account_to_model(account))
        .on_conflict(
            OnConflict::column(accounts::Column::Id)
                .update_columns([
                    accounts::Column::Username,
                    accounts::Column::Salary,
                    accounts::Column::OwnerId,
                    accounts::Column::CompanyName,
                    accounts::Column::EmployeeIds,
                    accounts::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(conn)
        .await
        .context("upsert account")?;
    Ok(())
}

// ── Row mapping ──────────────────────────────────────────────────────────────

fn account_from_model(model: accounts::Model) -> Result<Account, AccountsServiceError> {
    let role = u8::try_from(model.role)
        .ok()
        .and_then(Role::from_u8)
        .ok_or_else(|| {
            AccountsServiceError::Internal(anyhow!("unknown role value {}", model.role))
        })?;

    let account = match role {
        Role::Admin => Account::Admin(Admin {
            id: AccountId(model.id),
            username: model.username,
            external_id: model.external_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }),
        Role::Employee => Account::Employee(Employee {
            id: AccountId(model.id),
            username: model.username,
            external_id: model.external_id,
            salary: model.salary.unwrap_or(0.0),
            owner_id: model.owner_id.map(AccountId),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }),
        Role::CompanyOwner => {
            let employee_ids: BTreeSet<AccountId> = match model.employee_ids {
                Some(value) => {
                    serde_json::from_value(value).context("decode employee id set")?
                }
                None => BTreeSet::new(),
            };
            Account::CompanyOwner(CompanyOwner {
                id: AccountId(model.id),
                username: model.username,
                external_id: model.external_id,
                company_name: model.company_name,
                employee_ids,
                created_at: model.created_at,
                updated_at: model.updated_at,
            })
        }
    };
    Ok(account)
}

fn account_to_model(account: &Account) -> accounts::ActiveModel {
    let mut am = accounts::ActiveModel {
        id: Set(account.id().0),
        username: Set(account.username().to_owned()),
        external_id: Set(account.external_id().map(str::to_owned)),
        role: Set(account.role().as_u8() as i16),
        salary: Set(None),
        owner_id: Set(None),
        company_name: Set(None),
        employee_ids: Set(None),
        created_at: Set(account.created_at()),
        updated_at: Set(account.updated_at()),
    };
    match account {
        Account::Admin(_) => {}
        Account::Employee(e) => {
            am.salary = Set(Some(e.salary));
            am.owner_id = Set(e.owner_id.map(|id| id.0));
        }
        Account::CompanyOwner(o) => {
            am.company_name = Set(o.company_name.clone());
            am.employee_ids = Set(Some(Value::Array(
                o.employee_ids
                    .iter()
                    .map(|id| Value::String(id.0.to_string()))
                    .collect(),
            )));
        }
    }
    am
}
