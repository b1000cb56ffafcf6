use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crewdir_accounts::domain::assignment::verify_directory;
use crewdir_accounts::domain::repository::AccountDirectory;
use crewdir_accounts::error::AccountsServiceError;
use crewdir_auth_types::principal::Principal;
use crewdir_domain::account::{Account, CompanyOwner, Employee, Role};
use crewdir_domain::id::AccountId;

// ── MockDirectory ────────────────────────────────────────────────────────────

/// In-memory directory over a shared store. Two instances built from the
/// same `store_handle()` see one store, which is how the tests model
/// concurrent resolvers; every combined operation runs under a single lock.
pub struct MockDirectory {
    store: Arc<Mutex<Vec<Account>>>,
}

impl MockDirectory {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            store: Arc::new(Mutex::new(accounts)),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn from_handle(store: Arc<Mutex<Vec<Account>>>) -> Self {
        Self { store }
    }

    /// Shared handle to the store for post-execution inspection.
    pub fn store_handle(&self) -> Arc<Mutex<Vec<Account>>> {
        Arc::clone(&self.store)
    }

    pub fn snapshot(&self) -> Vec<Account> {
        self.store.lock().unwrap().clone()
    }

    pub fn find(&self, id: AccountId) -> Option<Account> {
        self.store
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id() == id)
            .cloned()
    }
}

fn upsert_locked(store: &mut Vec<Account>, account: &Account) {
    match store.iter_mut().find(|a| a.id() == account.id()) {
        Some(slot) => *slot = account.clone(),
        None => store.push(account.clone()),
    }
}

impl AccountDirectory for MockDirectory {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountsServiceError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id() == id)
            .cloned())
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<Account>, AccountsServiceError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.external_id() == Some(external_id))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountsServiceError> {
        Ok(self.store.lock().unwrap().clone())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<Account>, AccountsServiceError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.role() == role)
            .cloned()
            .collect())
    }

    async fn insert_if_absent(
        &self,
        account: &Account,
    ) -> Result<Account, AccountsServiceError> {
        let mut store = self.store.lock().unwrap();
        if let Some(existing) = store
            .iter()
            .find(|a| a.external_id().is_some() && a.external_id() == account.external_id())
        {
            return Ok(existing.clone());
        }
        store.push(account.clone());
        Ok(account.clone())
    }

    async fn upsert(&self, account: &Account) -> Result<(), AccountsServiceError> {
        upsert_locked(&mut self.store.lock().unwrap(), account);
        Ok(())
    }

    async fn upsert_pair(
        &self,
        first: &Account,
        second: &Account,
    ) -> Result<(), AccountsServiceError> {
        let mut store = self.store.lock().unwrap();
        upsert_locked(&mut store, first);
        upsert_locked(&mut store, second);
        Ok(())
    }

    async fn delete(&self, id: AccountId) -> Result<(), AccountsServiceError> {
        self.store.lock().unwrap().retain(|a| a.id() != id);
        Ok(())
    }

    async fn delete_with_upsert(
        &self,
        id: AccountId,
        companion: &Account,
    ) -> Result<(), AccountsServiceError> {
        let mut store = self.store.lock().unwrap();
        store.retain(|a| a.id() != id);
        upsert_locked(&mut store, companion);
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_employee(username: &str) -> Employee {
    let now = Utc::now();
    Employee {
        id: AccountId(Uuid::now_v7()),
        username: username.into(),
        external_id: Some(format!("idp-{username}")),
        salary: 1000.0,
        owner_id: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_owner(username: &str, company_name: Option<&str>) -> CompanyOwner {
    let now = Utc::now();
    CompanyOwner {
        id: AccountId(Uuid::now_v7()),
        username: username.into(),
        external_id: Some(format!("idp-{username}")),
        company_name: company_name.map(str::to_owned),
        employee_ids: BTreeSet::new(),
        created_at: now,
        updated_at: now,
    }
}

/// A pre-linked employee/owner pair.
pub fn assigned_pair(employee_name: &str, owner_name: &str, company: &str) -> (Employee, CompanyOwner) {
    let mut employee = test_employee(employee_name);
    let mut owner = test_owner(owner_name, Some(company));
    employee.owner_id = Some(owner.id);
    owner.employee_ids.insert(employee.id);
    (employee, owner)
}

pub fn principal(external_id: &str, username: &str, roles: &[&str]) -> Principal {
    Principal {
        external_id: external_id.into(),
        username: username.into(),
        roles: roles.iter().map(|r| (*r).to_owned()).collect::<HashSet<_>>(),
    }
}

/// Assert the bidirectional employment invariant over the whole store.
pub fn audit(directory: &MockDirectory) {
    verify_directory(&directory.snapshot()).expect("employment link invariant violated");
}
