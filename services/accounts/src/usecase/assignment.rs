use chrono::Utc;
use tracing::error;

use crewdir_domain::account::{Account, CompanyOwner, Employee, Role};
use crewdir_domain::id::AccountId;

use crate::domain::repository::AccountDirectory;
use crate::domain::types::Actor;
use crate::domain::{assignment, policy};
use crate::error::AccountsServiceError;

/// Resolve a company name to its owner. Company names identify at most one
/// owner; a name nobody carries resolves to `None`.
pub(crate) async fn owner_by_company<D: AccountDirectory>(
    directory: &D,
    company_name: &str,
) -> Result<Option<CompanyOwner>, AccountsServiceError> {
    let owners = directory.list_by_role(Role::CompanyOwner).await?;
    Ok(owners
        .into_iter()
        .filter_map(Account::into_company_owner)
        .find(|o| o.company_name.as_deref() == Some(company_name)))
}

async fn employee_by_id<D: AccountDirectory>(
    directory: &D,
    id: AccountId,
) -> Result<Employee, AccountsServiceError> {
    directory
        .find_by_id(id)
        .await?
        .and_then(Account::into_employee)
        .ok_or(AccountsServiceError::EmployeeNotFound)
}

// ── AssignToCompany (admin) ──────────────────────────────────────────────────

pub struct AssignToCompanyUseCase<D: AccountDirectory> {
    pub directory: D,
}

impl<D: AccountDirectory> AssignToCompanyUseCase<D> {
    /// Returns the updated owner record.
    pub async fn execute(
        &self,
        actor: &Actor,
        company_name: &str,
        employee_id: AccountId,
    ) -> Result<Account, AccountsServiceError> {
        if !policy::can_manage_company_assignments(actor) {
            return Err(AccountsServiceError::AccessDenied);
        }
        let employee = employee_by_id(&self.directory, employee_id).await?;
        let owner = owner_by_company(&self.directory, company_name)
            .await?
            .ok_or(AccountsServiceError::CompanyNotFound)?;

        let (employee, owner) = assignment::assign(employee, owner, Utc::now())?;
        let owner = Account::CompanyOwner(owner);
        self.directory
            .upsert_pair(&Account::Employee(employee), &owner)
            .await?;
        Ok(owner)
    }
}

// ── AssignToSelf (company owner) ─────────────────────────────────────────────

pub struct AssignToSelfUseCase<D: AccountDirectory> {
    pub directory: D,
}

impl<D: AccountDirectory> AssignToSelfUseCase<D> {
    /// Returns the updated employee record.
    pub async fn execute(
        &self,
        actor: &Actor,
        employee_id: AccountId,
    ) -> Result<Account, AccountsServiceError> {
        let owner = actor
            .as_company_owner()
            .ok_or(AccountsServiceError::AccessDenied)?;
        let employee = employee_by_id(&self.directory, employee_id).await?;

        let (employee, owner) = assignment::assign(employee, owner.clone(), Utc::now())?;
        let employee = Account::Employee(employee);
        self.directory
            .upsert_pair(&employee, &Account::CompanyOwner(owner))
            .await?;
        Ok(employee)
    }
}

// ── UnassignFromCompany (admin) ──────────────────────────────────────────────

pub struct UnassignFromCompanyUseCase<D: AccountDirectory> {
    pub directory: D,
}

impl<D: AccountDirectory> UnassignFromCompanyUseCase<D> {
    pub async fn execute(
        &self,
        actor: &Actor,
        company_name: &str,
        employee_id: AccountId,
    ) -> Result<(), AccountsServiceError> {
        if !policy::can_manage_company_assignments(actor) {
            return Err(AccountsServiceError::AccessDenied);
        }
        let employee = employee_by_id(&self.directory, employee_id).await?;
        if !employee.is_assigned() {
            return Err(AccountsServiceError::EmployeeNotAssigned);
        }
        let owner = owner_by_company(&self.directory, company_name)
            .await?
            .ok_or(AccountsServiceError::CompanyNotFound)?;

        let (employee, owner) = assignment::unassign(employee, owner, Utc::now())?;
        self.directory
            .upsert_pair(&Account::Employee(employee), &Account::CompanyOwner(owner))
            .await?;
        Ok(())
    }
}

// ── UnassignFromSelf (company owner) ─────────────────────────────────────────

pub struct UnassignFromSelfUseCase<D: AccountDirectory> {
    pub directory: D,
}

impl<D: AccountDirectory> UnassignFromSelfUseCase<D> {
    /// Returns the updated employee record.
    pub async fn execute(
        &self,
        actor: &Actor,
        employee_id: AccountId,
    ) -> Result<Account, AccountsServiceError> {
        let owner = actor
            .as_company_owner()
            .ok_or(AccountsServiceError::AccessDenied)?;
        if !policy::can_unassign_from_self(actor, employee_id) {
            return Err(AccountsServiceError::AccessDenied);
        }
        // The policy gate established membership; a target that no longer
        // resolves to an employee is a broken link, not a not-found.
        let employee = match self.directory.find_by_id(employee_id).await? {
            Some(account) => account.into_employee(),
            None => None,
        };
        let Some(employee) = employee else {
            error!(employee = %employee_id, owner = %owner.id, "owner set entry does not resolve to an employee");
            return Err(AccountsServiceError::LinkOutOfSync);
        };

        let (employee, owner) = assignment::unassign(employee, owner.clone(), Utc::now())?;
        let employee = Account::Employee(employee);
        self.directory
            .upsert_pair(&employee, &Account::CompanyOwner(owner))
            .await?;
        Ok(employee)
    }
}
