//! Employment link state machine.
//!
//! An employee is either unassigned (`owner_id` empty) or assigned to
//! exactly one company owner, whose `employee_ids` set holds the
//! employee's id. Transitions return the updated pair; callers persist
//! both records atomically or not at all.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use tracing::error;

use crewdir_domain::account::{Account, CompanyOwner, Employee};

use crate::error::AccountsServiceError;

/// Link an unassigned employee to an owner. Rejects an already-assigned
/// employee with a conflict instead of silently relinking.
pub fn assign(
    mut employee: Employee,
    mut owner: CompanyOwner,
    now: DateTime<Utc>,
) -> Result<(Employee, CompanyOwner), AccountsServiceError> {
    if employee.owner_id.is_some() {
        return Err(AccountsServiceError::EmployeeAlreadyAssigned);
    }
    employee.owner_id = Some(owner.id);
    employee.updated_at = now;
    owner.employee_ids.insert(employee.id);
    owner.updated_at = now;
    verify_link(&employee, &owner)?;
    Ok((employee, owner))
}

/// Detach an assigned employee from this owner.
pub fn unassign(
    mut employee: Employee,
    mut owner: CompanyOwner,
    now: DateTime<Utc>,
) -> Result<(Employee, CompanyOwner), AccountsServiceError> {
    match employee.owner_id {
        None => return Err(AccountsServiceError::EmployeeNotAssigned),
        Some(owner_id) if owner_id != owner.id => {
            return Err(AccountsServiceError::CompanyMismatch);
        }
        Some(_) => {}
    }
    if !owner.employee_ids.remove(&employee.id) {
        error!(
            employee = %employee.id,
            owner = %owner.id,
            "owner set does not hold its assigned employee"
        );
        return Err(AccountsServiceError::LinkOutOfSync);
    }
    employee.owner_id = None;
    employee.updated_at = now;
    owner.updated_at = now;
    verify_link(&employee, &owner)?;
    Ok((employee, owner))
}

/// Bidirectional invariant for one employee/owner pair: the employee points
/// at the owner exactly when the owner's set holds the employee.
pub fn verify_link(
    employee: &Employee,
    owner: &CompanyOwner,
) -> Result<(), AccountsServiceError> {
    let forward = employee.owner_id == Some(owner.id);
    let reverse = owner.employee_ids.contains(&employee.id);
    if forward != reverse {
        error!(
            employee = %employee.id,
            owner = %owner.id,
            forward,
            reverse,
            "employment link out of sync"
        );
        return Err(AccountsServiceError::LinkOutOfSync);
    }
    Ok(())
}

/// Whole-directory audit of the employment link invariant: every
/// `owner_id` resolves to an owner holding the employee, every set entry
/// resolves to an employee pointing back, and no employee is claimed by
/// two owners.
pub fn verify_directory(accounts: &[Account]) -> Result<(), AccountsServiceError> {
    let by_id: BTreeMap<_, _> = accounts.iter().map(|a| (a.id(), a)).collect();
    let mut claimed = BTreeSet::new();

    for account in accounts {
        match account {
            Account::Employee(e) => {
                if let Some(owner_id) = e.owner_id {
                    let holds = by_id
                        .get(&owner_id)
                        .and_then(|a| a.as_company_owner())
                        .is_some_and(|o| o.employee_ids.contains(&e.id));
                    if !holds {
                        error!(employee = %e.id, owner = %owner_id, "dangling owner reference");
                        return Err(AccountsServiceError::LinkOutOfSync);
                    }
                }
            }
            Account::CompanyOwner(o) => {
                for employee_id in &o.employee_ids {
                    if !claimed.insert(*employee_id) {
                        error!(employee = %employee_id, "employee claimed by two owners");
                        return Err(AccountsServiceError::LinkOutOfSync);
                    }
                    let points_back = by_id
                        .get(employee_id)
                        .and_then(|a| a.as_employee())
                        .is_some_and(|e| e.owner_id == Some(o.id));
                    if !points_back {
                        error!(employee = %employee_id, owner = %o.id, "one-sided employment link");
                        return Err(AccountsServiceError::LinkOutOfSync);
                    }
                }
            }
            Account::Admin(_) => {}
        }
    }
    Ok(())
}
