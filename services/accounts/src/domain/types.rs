use crewdir_domain::account::{Account, CompanyOwner, Employee};
use crewdir_domain::id::AccountId;

/// The acting principal after provisioning resolution.
///
/// Admins act on their role claim alone and usually have no directory
/// record; employees and company owners act through their materialized
/// record.
#[derive(Debug, Clone)]
pub enum Actor {
    Admin,
    Employee(Employee),
    CompanyOwner(CompanyOwner),
}

impl Actor {
    /// Fold a directory record into an acting principal.
    pub fn from_account(account: Account) -> Self {
        match account {
            Account::Admin(_) => Self::Admin,
            Account::Employee(e) => Self::Employee(e),
            Account::CompanyOwner(o) => Self::CompanyOwner(o),
        }
    }

    /// Directory id of the acting record, if one exists.
    pub fn account_id(&self) -> Option<AccountId> {
        match self {
            Self::Admin => None,
            Self::Employee(e) => Some(e.id),
            Self::CompanyOwner(o) => Some(o.id),
        }
    }

    pub fn as_company_owner(&self) -> Option<&CompanyOwner> {
        match self {
            Self::CompanyOwner(o) => Some(o),
            _ => None,
        }
    }
}
