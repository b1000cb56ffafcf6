use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Accounts service error taxonomy.
///
/// The not-found and conflict variants are expected, recoverable-by-caller
/// conditions and are never collapsed into each other. `AccessDenied` is
/// always reported distinctly from not-found so authorization does not leak
/// record existence. `LinkOutOfSync` is a fatal internal-consistency
/// failure: never repaired in place, only logged and surfaced.
#[derive(Debug, thiserror::Error)]
pub enum AccountsServiceError {
    #[error("account not found")]
    AccountNotFound,
    #[error("employee not found")]
    EmployeeNotFound,
    #[error("company not found")]
    CompanyNotFound,
    #[error("employee not assigned")]
    EmployeeNotAssigned,
    #[error("access denied")]
    AccessDenied,
    #[error("employee already assigned")]
    EmployeeAlreadyAssigned,
    #[error("employee is assigned to a different company")]
    CompanyMismatch,
    #[error("company still has assigned employees")]
    CompanyNotEmpty,
    #[error("salary must be a non-negative amount")]
    InvalidSalary,
    #[error("employment link out of sync")]
    LinkOutOfSync,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AccountsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            Self::CompanyNotFound => "COMPANY_NOT_FOUND",
            Self::EmployeeNotAssigned => "EMPLOYEE_NOT_ASSIGNED",
            Self::AccessDenied => "ACCESS_DENIED",
            Self::EmployeeAlreadyAssigned => "EMPLOYEE_ALREADY_ASSIGNED",
            Self::CompanyMismatch => "COMPANY_MISMATCH",
            Self::CompanyNotEmpty => "COMPANY_NOT_EMPTY",
            Self::InvalidSalary => "INVALID_SALARY",
            Self::LinkOutOfSync => "LINK_OUT_OF_SYNC",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AccountsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::AccountNotFound
            | Self::EmployeeNotFound
            | Self::CompanyNotFound
            | Self::EmployeeNotAssigned => StatusCode::NOT_FOUND,
            Self::AccessDenied => StatusCode::FORBIDDEN,
            Self::EmployeeAlreadyAssigned | Self::CompanyMismatch | Self::CompanyNotEmpty => {
                StatusCode::CONFLICT
            }
            Self::InvalidSalary => StatusCode::BAD_REQUEST,
            Self::LinkOutOfSync | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/
        // status for all requests, and 4xx are expected client errors.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            Self::LinkOutOfSync => {
                tracing::error!(kind = "LINK_OUT_OF_SYNC", "employment link out of sync");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
