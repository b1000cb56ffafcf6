//! Account variants and their validation.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::AccountId;

/// Account role.
///
/// Wire format: `u8` (0 = Admin, 1 = Employee, 2 = CompanyOwner).
/// Claim strings match the role names asserted by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin = 0,
    Employee = 1,
    CompanyOwner = 2,
}

impl Role {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Admin),
            1 => Some(Self::Employee),
            2 => Some(Self::CompanyOwner),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Role claim string as asserted by the identity provider.
    pub fn as_claim(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
            Self::CompanyOwner => "companyOwner",
        }
    }

    /// Parse an identity-provider claim string. Returns `None` for claims
    /// this service does not recognize.
    pub fn from_claim(claim: &str) -> Option<Self> {
        match claim {
            "admin" => Some(Self::Admin),
            "employee" => Some(Self::Employee),
            "companyOwner" => Some(Self::CompanyOwner),
            _ => None,
        }
    }
}

/// Administrator record. Directory-wide access is implied by the role;
/// admins normally act on their claim alone and are never materialized
/// by provisioning, but the model tolerates a stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct Admin {
    pub id: AccountId,
    pub username: String,
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Employee record. `owner_id` is a weak reference to the employing
/// company owner; when set, that owner's `employee_ids` must contain this
/// employee's id.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: AccountId,
    pub username: String,
    /// Identity-provider subject; empty until the employee first
    /// authenticates. Immutable once set.
    pub external_id: Option<String>,
    pub salary: f64,
    pub owner_id: Option<AccountId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn is_assigned(&self) -> bool {
        self.owner_id.is_some()
    }
}

/// Company-owner record. `employee_ids` holds the ids of currently
/// assigned employees; each must point back via its `owner_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyOwner {
    pub id: AccountId,
    pub username: String,
    pub external_id: Option<String>,
    pub company_name: Option<String>,
    pub employee_ids: BTreeSet<AccountId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A directory record. The role is implied by the variant, so a
/// role/variant mismatch is unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum Account {
    Admin(Admin),
    Employee(Employee),
    CompanyOwner(CompanyOwner),
}

impl Account {
    pub fn id(&self) -> AccountId {
        match self {
            Self::Admin(a) => a.id,
            Self::Employee(e) => e.id,
            Self::CompanyOwner(o) => o.id,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Self::Admin(a) => &a.username,
            Self::Employee(e) => &e.username,
            Self::CompanyOwner(o) => &o.username,
        }
    }

    pub fn external_id(&self) -> Option<&str> {
        match self {
            Self::Admin(a) => a.external_id.as_deref(),
            Self::Employee(e) => e.external_id.as_deref(),
            Self::CompanyOwner(o) => o.external_id.as_deref(),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Admin(_) => Role::Admin,
            Self::Employee(_) => Role::Employee,
            Self::CompanyOwner(_) => Role::CompanyOwner,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Admin(a) => a.created_at,
            Self::Employee(e) => e.created_at,
            Self::CompanyOwner(o) => o.created_at,
        }
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            Self::Admin(a) => a.updated_at,
            Self::Employee(e) => e.updated_at,
            Self::CompanyOwner(o) => o.updated_at,
        }
    }

    pub fn as_employee(&self) -> Option<&Employee> {
        match self {
            Self::Employee(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_company_owner(&self) -> Option<&CompanyOwner> {
        match self {
            Self::CompanyOwner(o) => Some(o),
            _ => None,
        }
    }

    pub fn into_employee(self) -> Option<Employee> {
        match self {
            Self::Employee(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_company_owner(self) -> Option<CompanyOwner> {
        match self {
            Self::CompanyOwner(o) => Some(o),
            _ => None,
        }
    }
}

/// An employee salary must be a finite, non-negative amount.
pub fn validate_salary(salary: f64) -> bool {
    salary.is_finite() && salary >= 0.0
}
