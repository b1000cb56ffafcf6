use crewdir_accounts::domain::types::Actor;
use crewdir_accounts::error::AccountsServiceError;
use crewdir_accounts::usecase::accounts::{
    CreateEmployeeInput, CreateEmployeeUseCase, DeleteAccountUseCase, GetAccountUseCase,
    ListAccountsUseCase, ListCompaniesUseCase, ListCompanyEmployeesUseCase, ListEmployeesUseCase,
};
use crewdir_domain::account::{Account, Role};
use crewdir_domain::id::AccountId;
use uuid::Uuid;

use crate::helpers::{MockDirectory, assigned_pair, audit, test_employee, test_owner};

fn seeded() -> MockDirectory {
    let (employee, owner) = assigned_pair("alice", "bob", "acme");
    MockDirectory::new(vec![
        Account::Employee(employee),
        Account::CompanyOwner(owner),
        Account::Employee(test_employee("carol")),
        Account::CompanyOwner(test_owner("dora", Some("globex"))),
        Account::CompanyOwner(test_owner("eric", None)),
    ])
}

// ── Listing ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_all_accounts_for_admin() {
    let usecase = ListAccountsUseCase { directory: seeded() };
    let accounts = usecase.execute(&Actor::Admin).await.unwrap();
    assert_eq!(accounts.len(), 5);
}

#[tokio::test]
async fn should_deny_directory_listing_to_non_admins() {
    let (employee, owner) = assigned_pair("alice", "bob", "acme");
    let usecase = ListAccountsUseCase { directory: seeded() };

    let result = usecase.execute(&Actor::Employee(employee)).await;
    assert!(matches!(result, Err(AccountsServiceError::AccessDenied)));

    let result = usecase.execute(&Actor::CompanyOwner(owner)).await;
    assert!(matches!(result, Err(AccountsServiceError::AccessDenied)));
}

#[tokio::test]
async fn should_list_only_employees() {
    let usecase = ListEmployeesUseCase { directory: seeded() };
    let employees = usecase.execute(&Actor::Admin).await.unwrap();
    assert_eq!(employees.len(), 2);
    assert!(employees.iter().all(|a| a.role() == Role::Employee));
}

#[tokio::test]
async fn should_list_each_company_once_and_skip_unnamed() {
    let mut accounts = seeded().snapshot();
    // a second owner carrying an already-listed name must not double it
    accounts.push(Account::CompanyOwner(test_owner("frank", Some("acme"))));
    let usecase = ListCompaniesUseCase {
        directory: MockDirectory::new(accounts),
    };

    let companies = usecase.execute(&Actor::Admin).await.unwrap();
    assert_eq!(companies, vec!["acme".to_owned(), "globex".to_owned()]);
}

#[tokio::test]
async fn should_list_company_roster_by_name() {
    let (employee, owner) = assigned_pair("alice", "bob", "acme");
    let employee_id = employee.id;
    let directory = MockDirectory::new(vec![
        Account::Employee(employee),
        Account::CompanyOwner(owner),
        Account::Employee(test_employee("carol")),
    ]);
    let usecase = ListCompanyEmployeesUseCase { directory };

    let roster = usecase.execute(&Actor::Admin, "acme").await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].id(), employee_id);
}

#[tokio::test]
async fn should_return_empty_roster_for_unknown_company() {
    let usecase = ListCompanyEmployeesUseCase { directory: seeded() };
    let roster = usecase.execute(&Actor::Admin, "initech").await.unwrap();
    assert!(roster.is_empty());
}

// ── Reads ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_let_employee_read_own_record_only() {
    let (employee, _) = assigned_pair("alice", "bob", "acme");
    let own_id = employee.id;
    let other = test_employee("carol");
    let other_id = other.id;
    let directory = MockDirectory::new(vec![
        Account::Employee(employee.clone()),
        Account::Employee(other),
    ]);
    let usecase = GetAccountUseCase { directory };
    let actor = Actor::Employee(employee);

    let own = usecase.execute(&actor, own_id).await.unwrap();
    assert_eq!(own.id(), own_id);

    let result = usecase.execute(&actor, other_id).await;
    assert!(matches!(result, Err(AccountsServiceError::AccessDenied)));
}

#[tokio::test]
async fn should_let_owner_read_linked_employee_but_not_unlinked() {
    let (employee, owner) = assigned_pair("alice", "bob", "acme");
    let linked_id = employee.id;
    let unlinked = test_employee("carol");
    let unlinked_id = unlinked.id;
    let directory = MockDirectory::new(vec![
        Account::Employee(employee),
        Account::CompanyOwner(owner.clone()),
        Account::Employee(unlinked),
    ]);
    let usecase = GetAccountUseCase { directory };
    let actor = Actor::CompanyOwner(owner);

    assert!(usecase.execute(&actor, linked_id).await.is_ok());

    let result = usecase.execute(&actor, unlinked_id).await;
    assert!(matches!(result, Err(AccountsServiceError::AccessDenied)));
}

#[tokio::test]
async fn should_not_leak_existence_to_denied_readers() {
    let employee = test_employee("alice");
    let directory = MockDirectory::new(vec![Account::Employee(employee.clone())]);
    let usecase = GetAccountUseCase { directory };
    let actor = Actor::Employee(employee);

    // absent id and existing-but-foreign id are indistinguishable
    let result = usecase.execute(&actor, AccountId(Uuid::now_v7())).await;
    assert!(matches!(result, Err(AccountsServiceError::AccessDenied)));
}

#[tokio::test]
async fn should_report_not_found_to_admin_for_absent_id() {
    let usecase = GetAccountUseCase { directory: seeded() };
    let result = usecase.execute(&Actor::Admin, AccountId(Uuid::now_v7())).await;
    assert!(matches!(result, Err(AccountsServiceError::AccountNotFound)));
}

// ── Create employee ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_unassigned_employee_as_admin() {
    let directory = MockDirectory::empty();
    let store = directory.store_handle();
    let usecase = CreateEmployeeUseCase { directory };

    let account = usecase
        .execute(
            &Actor::Admin,
            CreateEmployeeInput {
                username: "carol".into(),
                salary: 1500.0,
            },
        )
        .await
        .unwrap();

    let employee = account.as_employee().unwrap();
    assert_eq!(employee.owner_id, None);
    assert_eq!(employee.external_id, None);
    assert_eq!(employee.salary, 1500.0);
    audit(&MockDirectory::from_handle(store));
}

#[tokio::test]
async fn should_auto_assign_employee_created_by_owner() {
    let owner = test_owner("bob", Some("acme"));
    let owner_id = owner.id;
    let directory = MockDirectory::new(vec![Account::CompanyOwner(owner.clone())]);
    let store = directory.store_handle();
    let usecase = CreateEmployeeUseCase { directory };

    let account = usecase
        .execute(
            &Actor::CompanyOwner(owner),
            CreateEmployeeInput {
                username: "carol".into(),
                salary: 900.0,
            },
        )
        .await
        .unwrap();

    let employee_id = account.id();
    assert_eq!(account.as_employee().unwrap().owner_id, Some(owner_id));

    let directory = MockDirectory::from_handle(store);
    let stored_owner = directory.find(owner_id).unwrap();
    assert!(
        stored_owner
            .as_company_owner()
            .unwrap()
            .employee_ids
            .contains(&employee_id)
    );
    audit(&directory);
}

#[tokio::test]
async fn should_reject_negative_salary() {
    let usecase = CreateEmployeeUseCase {
        directory: MockDirectory::empty(),
    };
    let result = usecase
        .execute(
            &Actor::Admin,
            CreateEmployeeInput {
                username: "carol".into(),
                salary: -1.0,
            },
        )
        .await;
    assert!(matches!(result, Err(AccountsServiceError::InvalidSalary)));
}

#[tokio::test]
async fn should_deny_employee_creating_employees() {
    let usecase = CreateEmployeeUseCase {
        directory: MockDirectory::empty(),
    };
    let result = usecase
        .execute(
            &Actor::Employee(test_employee("alice")),
            CreateEmployeeInput {
                username: "carol".into(),
                salary: 0.0,
            },
        )
        .await;
    assert!(matches!(result, Err(AccountsServiceError::AccessDenied)));
}

// ── Delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_unassigned_employee_as_admin() {
    let employee = test_employee("carol");
    let id = employee.id;
    let directory = MockDirectory::new(vec![Account::Employee(employee)]);
    let store = directory.store_handle();
    let usecase = DeleteAccountUseCase { directory };

    usecase.execute(&Actor::Admin, id).await.unwrap();
    assert!(store.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_detach_assigned_employee_on_admin_delete() {
    let (employee, owner) = assigned_pair("alice", "bob", "acme");
    let employee_id = employee.id;
    let owner_id = owner.id;
    let directory = MockDirectory::new(vec![
        Account::Employee(employee),
        Account::CompanyOwner(owner),
    ]);
    let store = directory.store_handle();
    let usecase = DeleteAccountUseCase { directory };

    usecase.execute(&Actor::Admin, employee_id).await.unwrap();

    let directory = MockDirectory::from_handle(store);
    assert!(directory.find(employee_id).is_none());
    let stored_owner = directory.find(owner_id).unwrap();
    assert!(
        stored_owner
            .as_company_owner()
            .unwrap()
            .employee_ids
            .is_empty()
    );
    audit(&directory);
}

#[tokio::test]
async fn should_treat_absent_id_delete_as_no_op() {
    let usecase = DeleteAccountUseCase { directory: seeded() };
    assert!(
        usecase
            .execute(&Actor::Admin, AccountId(Uuid::now_v7()))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn should_reject_deleting_owner_with_assigned_employees() {
    let (employee, owner) = assigned_pair("alice", "bob", "acme");
    let owner_id = owner.id;
    let directory = MockDirectory::new(vec![
        Account::Employee(employee),
        Account::CompanyOwner(owner),
    ]);
    let store = directory.store_handle();
    let usecase = DeleteAccountUseCase { directory };

    let result = usecase.execute(&Actor::Admin, owner_id).await;
    assert!(matches!(result, Err(AccountsServiceError::CompanyNotEmpty)));
    assert_eq!(store.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_delete_owner_with_empty_roster() {
    let owner = test_owner("bob", Some("acme"));
    let owner_id = owner.id;
    let directory = MockDirectory::new(vec![Account::CompanyOwner(owner)]);
    let store = directory.store_handle();
    let usecase = DeleteAccountUseCase { directory };

    usecase.execute(&Actor::Admin, owner_id).await.unwrap();
    assert!(store.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_let_owner_delete_own_employee() {
    let (employee, owner) = assigned_pair("alice", "bob", "acme");
    let employee_id = employee.id;
    let owner_id = owner.id;
    let directory = MockDirectory::new(vec![
        Account::Employee(employee),
        Account::CompanyOwner(owner.clone()),
    ]);
    let store = directory.store_handle();
    let usecase = DeleteAccountUseCase { directory };

    usecase
        .execute(&Actor::CompanyOwner(owner), employee_id)
        .await
        .unwrap();

    let directory = MockDirectory::from_handle(store);
    assert!(directory.find(employee_id).is_none());
    let stored_owner = directory.find(owner_id).unwrap();
    assert!(
        stored_owner
            .as_company_owner()
            .unwrap()
            .employee_ids
            .is_empty()
    );
    audit(&directory);
}

#[tokio::test]
async fn should_deny_owner_deleting_unlinked_employee() {
    let owner = test_owner("bob", Some("acme"));
    let unlinked = test_employee("carol");
    let unlinked_id = unlinked.id;
    let directory = MockDirectory::new(vec![
        Account::CompanyOwner(owner.clone()),
        Account::Employee(unlinked),
    ]);
    let store = directory.store_handle();
    let usecase = DeleteAccountUseCase { directory };

    let result = usecase
        .execute(&Actor::CompanyOwner(owner), unlinked_id)
        .await;
    assert!(matches!(result, Err(AccountsServiceError::AccessDenied)));
    assert_eq!(store.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_deny_employee_deletes() {
    let employee = test_employee("alice");
    let target = employee.id;
    let usecase = DeleteAccountUseCase {
        directory: MockDirectory::new(vec![Account::Employee(employee.clone())]),
    };
    let result = usecase.execute(&Actor::Employee(employee), target).await;
    assert!(matches!(result, Err(AccountsServiceError::AccessDenied)));
}
