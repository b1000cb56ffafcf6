use std::collections::BTreeSet;

use chrono::Utc;
use tracing::error;
use uuid::Uuid;

use crewdir_domain::account::{Account, Employee, Role, validate_salary};
use crewdir_domain::id::AccountId;

use crate::domain::repository::AccountDirectory;
use crate::domain::types::Actor;
use crate::domain::{assignment, policy};
use crate::error::AccountsServiceError;
use crate::usecase::assignment::owner_by_company;

// ── ListAccounts ─────────────────────────────────────────────────────────────

pub struct ListAccountsUseCase<D: AccountDirectory> {
    pub directory: D,
}

impl<D: AccountDirectory> ListAccountsUseCase<D> {
    pub async fn execute(&self, actor: &Actor) -> Result<Vec<Account>, AccountsServiceError> {
        if !policy::can_list_directory(actor) {
            return Err(AccountsServiceError::AccessDenied);
        }
        self.directory.list_all().await
    }
}

// ── GetAccount ───────────────────────────────────────────────────────────────

pub struct GetAccountUseCase<D: AccountDirectory> {
    pub directory: D,
}

impl<D: AccountDirectory> GetAccountUseCase<D> {
    pub async fn execute(
        &self,
        actor: &Actor,
        id: AccountId,
    ) -> Result<Account, AccountsServiceError> {
        // Decide on the id alone, before the fetch: a denied caller learns
        // nothing about whether the record exists.
        if !policy::can_read_account(actor, id) {
            return Err(AccountsServiceError::AccessDenied);
        }
        self.directory
            .find_by_id(id)
            .await?
            .ok_or(AccountsServiceError::AccountNotFound)
    }
}

// ── ListEmployees ────────────────────────────────────────────────────────────

pub struct ListEmployeesUseCase<D: AccountDirectory> {
    pub directory: D,
}

impl<D: AccountDirectory> ListEmployeesUseCase<D> {
    pub async fn execute(&self, actor: &Actor) -> Result<Vec<Account>, AccountsServiceError> {
        if !policy::can_list_directory(actor) {
            return Err(AccountsServiceError::AccessDenied);
        }
        self.directory.list_by_role(Role::Employee).await
    }
}

// ── ListCompanies ────────────────────────────────────────────────────────────

pub struct ListCompaniesUseCase<D: AccountDirectory> {
    pub directory: D,
}

impl<D: AccountDirectory> ListCompaniesUseCase<D> {
    /// Each distinct non-null company name appears exactly once.
    pub async fn execute(&self, actor: &Actor) -> Result<Vec<String>, AccountsServiceError> {
        if !policy::can_list_directory(actor) {
            return Err(AccountsServiceError::AccessDenied);
        }
        let owners = self.directory.list_by_role(Role::CompanyOwner).await?;
        let names: BTreeSet<String> = owners
            .iter()
            .filter_map(Account::as_company_owner)
            .filter_map(|o| o.company_name.clone())
            .collect();
        Ok(names.into_iter().collect())
    }
}

// ── ListCompanyEmployees ─────────────────────────────────────────────────────

pub struct ListCompanyEmployeesUseCase<D: AccountDirectory> {
    pub directory: D,
}

impl<D: AccountDirectory> ListCompanyEmployeesUseCase<D> {
    /// An unknown company name yields an empty roster, not an error.
    pub async fn execute(
        &self,
        actor: &Actor,
        company_name: &str,
    ) -> Result<Vec<Account>, AccountsServiceError> {
        if !policy::can_list_directory(actor) {
            return Err(AccountsServiceError::AccessDenied);
        }
        let Some(owner) = owner_by_company(&self.directory, company_name).await? else {
            return Ok(Vec::new());
        };
        let employees = self.directory.list_by_role(Role::Employee).await?;
        Ok(employees
            .into_iter()
            .filter(|a| {
                a.as_employee()
                    .is_some_and(|e| e.owner_id == Some(owner.id))
            })
            .collect())
    }
}

// ── CreateEmployee ───────────────────────────────────────────────────────────

pub struct CreateEmployeeInput {
    pub username: String,
    pub salary: f64,
}

pub struct CreateEmployeeUseCase<D: AccountDirectory> {
    pub directory: D,
}

impl<D: AccountDirectory> CreateEmployeeUseCase<D> {
    /// Admins create an unassigned employee; a company owner's new
    /// employee is assigned to the owner in the same directory write.
    pub async fn execute(
        &self,
        actor: &Actor,
        input: CreateEmployeeInput,
    ) -> Result<Account, AccountsServiceError> {
        if !policy::can_create_employee(actor) {
            return Err(AccountsServiceError::AccessDenied);
        }
        if !validate_salary(input.salary) {
            return Err(AccountsServiceError::InvalidSalary);
        }

        let now = Utc::now();
        let employee = Employee {
            id: AccountId(Uuid::now_v7()),
            username: input.username,
            external_id: None,
            salary: input.salary,
            owner_id: None,
            created_at: now,
            updated_at: now,
        };

        match actor {
            Actor::CompanyOwner(owner) => {
                let (employee, owner) = assignment::assign(employee, owner.clone(), now)?;
                let account = Account::Employee(employee);
                self.directory
                    .upsert_pair(&account, &Account::CompanyOwner(owner))
                    .await?;
                Ok(account)
            }
            Actor::Admin => {
                let account = Account::Employee(employee);
                self.directory.upsert(&account).await?;
                Ok(account)
            }
            Actor::Employee(_) => Err(AccountsServiceError::AccessDenied),
        }
    }
}

// ── DeleteAccount ────────────────────────────────────────────────────────────

pub struct DeleteAccountUseCase<D: AccountDirectory> {
    pub directory: D,
}

impl<D: AccountDirectory> DeleteAccountUseCase<D> {
    /// An assigned employee is detached from its owner in the same
    /// transaction that removes the record; an owner with a non-empty
    /// employee set is rejected rather than silently orphaning its
    /// employees. Deleting an absent id is a no-op.
    pub async fn execute(
        &self,
        actor: &Actor,
        id: AccountId,
    ) -> Result<(), AccountsServiceError> {
        if !policy::can_delete_account(actor, id) {
            return Err(AccountsServiceError::AccessDenied);
        }

        match actor {
            Actor::Admin => {
                let Some(target) = self.directory.find_by_id(id).await? else {
                    return Ok(());
                };
                match target {
                    Account::Employee(employee) => self.delete_employee(employee).await,
                    Account::CompanyOwner(owner) => {
                        if !owner.employee_ids.is_empty() {
                            return Err(AccountsServiceError::CompanyNotEmpty);
                        }
                        self.directory.delete(owner.id).await
                    }
                    Account::Admin(admin) => self.directory.delete(admin.id).await,
                }
            }
            Actor::CompanyOwner(acting_owner) => {
                // The policy gate established that the target is in this
                // owner's set, so a missing, non-employee, or
                // differently-owned record means the link is broken.
                let employee = match self.directory.find_by_id(id).await? {
                    Some(account) => account.into_employee(),
                    None => None,
                };
                let Some(employee) = employee else {
                    error!(employee = %id, "owner set entry does not resolve to an employee");
                    return Err(AccountsServiceError::LinkOutOfSync);
                };
                if employee.owner_id != Some(acting_owner.id) {
                    error!(
                        employee = %id,
                        owner = %acting_owner.id,
                        "owner set entry points at a different owner"
                    );
                    return Err(AccountsServiceError::LinkOutOfSync);
                }
                self.delete_employee(employee).await
            }
            Actor::Employee(_) => Err(AccountsServiceError::AccessDenied),
        }
    }

    async fn delete_employee(&self, employee: Employee) -> Result<(), AccountsServiceError> {
        let Some(owner_id) = employee.owner_id else {
            return self.directory.delete(employee.id).await;
        };
        let owner = match self.directory.find_by_id(owner_id).await? {
            Some(account) => account.into_company_owner(),
            None => None,
        };
        let Some(owner) = owner else {
            error!(employee = %employee.id, owner = %owner_id, "assigned employee references missing owner");
            return Err(AccountsServiceError::LinkOutOfSync);
        };
        let employee_id = employee.id;
        let (_, owner) = assignment::unassign(employee, owner, Utc::now())?;
        self.directory
            .delete_with_upsert(employee_id, &Account::CompanyOwner(owner))
            .await
    }
}
