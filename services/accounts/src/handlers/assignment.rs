use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crewdir_auth_types::principal::Principal;
use crewdir_domain::id::AccountId;

use crate::error::AccountsServiceError;
use crate::handlers::accounts::AccountResponse;
use crate::handlers::resolve_actor;
use crate::state::AppState;
use crate::usecase::assignment::{
    AssignToCompanyUseCase, AssignToSelfUseCase, UnassignFromCompanyUseCase,
    UnassignFromSelfUseCase,
};

// ── PUT /accounts/companies/{name}/employees/{id} ────────────────────────────

pub async fn assign_to_company(
    principal: Principal,
    State(state): State<AppState>,
    Path((name, id)): Path<(String, Uuid)>,
) -> Result<Json<AccountResponse>, AccountsServiceError> {
    let actor = resolve_actor(&state, &principal).await?;
    let usecase = AssignToCompanyUseCase {
        directory: state.directory(),
    };
    let owner = usecase.execute(&actor, &name, AccountId(id)).await?;
    Ok(Json(owner.into()))
}

// ── DELETE /accounts/companies/{name}/employees/{id} ─────────────────────────

pub async fn unassign_from_company(
    principal: Principal,
    State(state): State<AppState>,
    Path((name, id)): Path<(String, Uuid)>,
) -> Result<StatusCode, AccountsServiceError> {
    let actor = resolve_actor(&state, &principal).await?;
    let usecase = UnassignFromCompanyUseCase {
        directory: state.directory(),
    };
    usecase.execute(&actor, &name, AccountId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PUT /accounts/@me/employees/{id} ─────────────────────────────────────────

pub async fn assign_to_me(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountResponse>, AccountsServiceError> {
    let actor = resolve_actor(&state, &principal).await?;
    let usecase = AssignToSelfUseCase {
        directory: state.directory(),
    };
    let employee = usecase.execute(&actor, AccountId(id)).await?;
    Ok(Json(employee.into()))
}

// ── DELETE /accounts/@me/employees/{id} ──────────────────────────────────────

pub async fn unassign_from_me(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountResponse>, AccountsServiceError> {
    let actor = resolve_actor(&state, &principal).await?;
    let usecase = UnassignFromSelfUseCase {
        directory: state.directory(),
    };
    let employee = usecase.execute(&actor, AccountId(id)).await?;
    Ok(Json(employee.into()))
}
