use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crewdir_core::health::{healthz, readyz};
use crewdir_core::middleware::request_id_layer;

use crate::handlers::{
    accounts::{
        create_employee, delete_account, get_account, list_accounts, list_companies,
        list_company_employees, list_employees,
    },
    assignment::{assign_to_company, assign_to_me, unassign_from_company, unassign_from_me},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Directory reads
        .route("/accounts", get(list_accounts))
        .route("/accounts/employees", get(list_employees))
        .route("/accounts/companies", get(list_companies))
        .route("/accounts/companies/{name}/employees", get(list_company_employees))
        .route("/accounts/{id}", get(get_account))
        // Account lifecycle
        .route("/accounts/employees", post(create_employee))
        .route("/accounts/{id}", delete(delete_account))
        // Assignment (admin, by company name)
        .route("/accounts/companies/{name}/employees/{id}", put(assign_to_company))
        .route("/accounts/companies/{name}/employees/{id}", delete(unassign_from_company))
        // Assignment (company owner, own company)
        .route("/accounts/@me/employees/{id}", put(assign_to_me))
        .route("/accounts/@me/employees/{id}", delete(unassign_from_me))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
