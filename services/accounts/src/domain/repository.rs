#![allow(async_fn_in_trait)]

use crewdir_domain::account::{Account, Role};
use crewdir_domain::id::AccountId;

use crate::error::AccountsServiceError;

/// Keyed store of account records.
///
/// The store serializes writes to a given record. The combined operations
/// (`insert_if_absent`, `upsert_pair`, `delete_with_upsert`) are atomic so
/// a concurrent reader never observes a half-applied update.
pub trait AccountDirectory: Send + Sync {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountsServiceError>;

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<Account>, AccountsServiceError>;

    async fn list_all(&self) -> Result<Vec<Account>, AccountsServiceError>;

    async fn list_by_role(&self, role: Role) -> Result<Vec<Account>, AccountsServiceError>;

    /// Create-if-absent keyed by `external_id`. Exactly one record survives
    /// a race; the returned account is the persisted winner.
    async fn insert_if_absent(
        &self,
        account: &Account,
    ) -> Result<Account, AccountsServiceError>;

    /// Idempotent on id; `external_id`, `role`, and `created_at` are never
    /// overwritten.
    async fn upsert(&self, account: &Account) -> Result<(), AccountsServiceError>;

    /// Persist two records atomically — both land or neither does.
    async fn upsert_pair(
        &self,
        first: &Account,
        second: &Account,
    ) -> Result<(), AccountsServiceError>;

    /// Deleting an absent id is a no-op, not a failure.
    async fn delete(&self, id: AccountId) -> Result<(), AccountsServiceError>;

    /// Delete one record and update a companion atomically.
    async fn delete_with_upsert(
        &self,
        id: AccountId,
        companion: &Account,
    ) -> Result<(), AccountsServiceError>;
}
