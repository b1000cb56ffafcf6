//! Role- and relationship-scoped access decisions.
//!
//! Pure functions over the acting principal and target ids; callers turn a
//! `false` into `AccessDenied`. Read and delete decisions are id-scoped so
//! a denial can be produced without fetching the target — authorization
//! never leaks whether a record exists.

use crewdir_domain::id::AccountId;

use crate::domain::types::Actor;

/// Listing the whole directory: all accounts, all employees, company names,
/// or a company's employee roster.
pub fn can_list_directory(actor: &Actor) -> bool {
    matches!(actor, Actor::Admin)
}

/// Reading a single account by id. Employees see only themselves; company
/// owners additionally see their currently assigned employees.
pub fn can_read_account(actor: &Actor, target: AccountId) -> bool {
    match actor {
        Actor::Admin => true,
        Actor::Employee(e) => e.id == target,
        Actor::CompanyOwner(o) => o.id == target || o.employee_ids.contains(&target),
    }
}

/// Creating a new employee record.
pub fn can_create_employee(actor: &Actor) -> bool {
    match actor {
        Actor::Admin | Actor::CompanyOwner(_) => true,
        Actor::Employee(_) => false,
    }
}

/// Deleting an account by id. Admins are unconditional; company owners may
/// delete only employees currently assigned to them.
pub fn can_delete_account(actor: &Actor, target: AccountId) -> bool {
    match actor {
        Actor::Admin => true,
        Actor::Employee(_) => false,
        Actor::CompanyOwner(o) => o.employee_ids.contains(&target),
    }
}

/// Assigning or unassigning by company name is an administrative operation.
pub fn can_manage_company_assignments(actor: &Actor) -> bool {
    matches!(actor, Actor::Admin)
}

/// Unassigning an employee from the caller's own company.
pub fn can_unassign_from_self(actor: &Actor, target: AccountId) -> bool {
    match actor {
        Actor::CompanyOwner(o) => o.employee_ids.contains(&target),
        Actor::Admin | Actor::Employee(_) => false,
    }
}
