use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crewdir_auth_types::principal::Principal;
use crewdir_domain::account::{Account, Role};
use crewdir_domain::id::AccountId;

use crate::error::AccountsServiceError;
use crate::handlers::resolve_actor;
use crate::state::AppState;
use crate::usecase::accounts::{
    CreateEmployeeInput, CreateEmployeeUseCase, DeleteAccountUseCase, GetAccountUseCase,
    ListAccountsUseCase, ListCompaniesUseCase, ListCompanyEmployeesUseCase, ListEmployeesUseCase,
};

// ── Responses ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_ids: Option<Vec<String>>,
    #[serde(serialize_with = "crewdir_core::serde::rfc3339_millis")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "crewdir_core::serde::rfc3339_millis")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        match account {
            Account::Admin(a) => Self {
                id: a.id.to_string(),
                username: a.username,
                role: Role::Admin,
                external_id: a.external_id,
                salary: None,
                owner_id: None,
                company_name: None,
                employee_ids: None,
                created_at: a.created_at,
                updated_at: a.updated_at,
            },
            Account::Employee(e) => Self {
                id: e.id.to_string(),
                username: e.username,
                role: Role::Employee,
                external_id: e.external_id,
                salary: Some(e.salary),
                owner_id: e.owner_id.map(|id| id.to_string()),
                company_name: None,
                employee_ids: None,
                created_at: e.created_at,
                updated_at: e.updated_at,
            },
            Account::CompanyOwner(o) => Self {
                id: o.id.to_string(),
                username: o.username,
                role: Role::CompanyOwner,
                external_id: o.external_id,
                salary: None,
                owner_id: None,
                company_name: o.company_name,
                employee_ids: Some(o.employee_ids.iter().map(|id| id.to_string()).collect()),
                created_at: o.created_at,
                updated_at: o.updated_at,
            },
        }
    }
}

// ── GET /accounts ────────────────────────────────────────────────────────────

pub async fn list_accounts(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountResponse>>, AccountsServiceError> {
    let actor = resolve_actor(&state, &principal).await?;
    let usecase = ListAccountsUseCase {
        directory: state.directory(),
    };
    let accounts = usecase.execute(&actor).await?;
    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

// ── GET /accounts/{id} ───────────────────────────────────────────────────────

pub async fn get_account(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountResponse>, AccountsServiceError> {
    let actor = resolve_actor(&state, &principal).await?;
    let usecase = GetAccountUseCase {
        directory: state.directory(),
    };
    let account = usecase.execute(&actor, AccountId(id)).await?;
    Ok(Json(account.into()))
}

// ── GET /accounts/employees ──────────────────────────────────────────────────

pub async fn list_employees(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountResponse>>, AccountsServiceError> {
    let actor = resolve_actor(&state, &principal).await?;
    let usecase = ListEmployeesUseCase {
        directory: state.directory(),
    };
    let employees = usecase.execute(&actor).await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

// ── GET /accounts/companies ──────────────────────────────────────────────────

pub async fn list_companies(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AccountsServiceError> {
    let actor = resolve_actor(&state, &principal).await?;
    let usecase = ListCompaniesUseCase {
        directory: state.directory(),
    };
    Ok(Json(usecase.execute(&actor).await?))
}

// ── GET /accounts/companies/{name}/employees ─────────────────────────────────

pub async fn list_company_employees(
    principal: Principal,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<AccountResponse>>, AccountsServiceError> {
    let actor = resolve_actor(&state, &principal).await?;
    let usecase = ListCompanyEmployeesUseCase {
        directory: state.directory(),
    };
    let employees = usecase.execute(&actor, &name).await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

// ── POST /accounts/employees ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateEmployeeRequest {
    pub username: String,
    #[serde(default)]
    pub salary: f64,
}

pub async fn create_employee(
    principal: Principal,
    State(state): State<AppState>,
    Json(body): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), AccountsServiceError> {
    let actor = resolve_actor(&state, &principal).await?;
    let usecase = CreateEmployeeUseCase {
        directory: state.directory(),
    };
    let account = usecase
        .execute(
            &actor,
            CreateEmployeeInput {
                username: body.username,
                salary: body.salary,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

// ── DELETE /accounts/{id} ────────────────────────────────────────────────────

pub async fn delete_account(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AccountsServiceError> {
    let actor = resolve_actor(&state, &principal).await?;
    let usecase = DeleteAccountUseCase {
        directory: state.directory(),
    };
    usecase.execute(&actor, AccountId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
