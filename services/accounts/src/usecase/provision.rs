use std::collections::BTreeSet;

use chrono::Utc;
use uuid::Uuid;

use crewdir_auth_types::principal::Principal;
use crewdir_domain::account::{Account, CompanyOwner, Employee, Role};
use crewdir_domain::id::AccountId;

use crate::domain::repository::AccountDirectory;
use crate::domain::types::Actor;
use crate::error::AccountsServiceError;

// ── ResolveActor ─────────────────────────────────────────────────────────────

/// Maps a verified principal to an acting account, materializing an
/// employee or company-owner record on first authenticated contact.
///
/// Admins are asserted by their claim alone and never materialized. The
/// create path is create-if-absent keyed on the principal's external id,
/// so two racing first contacts persist exactly one record and the loser
/// observes the winner's. At most one directory write per call.
pub struct ResolveActorUseCase<D: AccountDirectory> {
    pub directory: D,
}

impl<D: AccountDirectory> ResolveActorUseCase<D> {
    pub async fn execute(&self, principal: &Principal) -> Result<Actor, AccountsServiceError> {
        if let Some(account) = self
            .directory
            .find_by_external_id(&principal.external_id)
            .await?
        {
            return Ok(Actor::from_account(account));
        }

        let now = Utc::now();
        if principal.has_role(Role::Employee.as_claim()) {
            let employee = Account::Employee(Employee {
                id: AccountId(Uuid::now_v7()),
                username: principal.username.clone(),
                external_id: Some(principal.external_id.clone()),
                salary: 0.0,
                owner_id: None,
                created_at: now,
                updated_at: now,
            });
            let winner = self.directory.insert_if_absent(&employee).await?;
            return Ok(Actor::from_account(winner));
        }

        if principal.has_role(Role::CompanyOwner.as_claim()) {
            let owner = Account::CompanyOwner(CompanyOwner {
                id: AccountId(Uuid::now_v7()),
                username: principal.username.clone(),
                external_id: Some(principal.external_id.clone()),
                company_name: None,
                employee_ids: BTreeSet::new(),
                created_at: now,
                updated_at: now,
            });
            let winner = self.directory.insert_if_absent(&owner).await?;
            return Ok(Actor::from_account(winner));
        }

        if principal.has_role(Role::Admin.as_claim()) {
            return Ok(Actor::Admin);
        }

        Err(AccountsServiceError::AccessDenied)
    }
}
