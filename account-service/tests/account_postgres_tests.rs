use account_service::{AccountService, AccountServiceConfig, RepositoryType};
use common::Error;
use tokio::test;

use dotenv::dotenv;

// PostgreSQL integration tests for account service
// These tests require a running PostgreSQL database
// Run with: cargo test --test account_postgres_tests -- --ignored

async fn create_test_service() -> AccountService {
    dotenv().ok(); // Load .env if it exists

    let database_url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set to run PostgreSQL tests");

    AccountService::with_repository(RepositoryType::Postgres(AccountServiceConfig::new(database_url, 2)))
        .await
        .expect("Failed to create account service with PostgreSQL repository")
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_create_and_get() {
    let service = create_test_service().await;

    let account = service.create_account("Ada", "Lovelace").await.unwrap();
    let retrieved = service.get_account(account.id).await.unwrap();

    assert_eq!(retrieved.first_name, "Ada");
    assert_eq!(retrieved.last_name, "Lovelace");
    assert_eq!(retrieved.number, account.number);
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_init_is_idempotent() {
    // Running table creation twice must not fail
    let _first = create_test_service().await;
    let _second = create_test_service().await;
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_update_and_transfer() {
    let service = create_test_service().await;
    let account = service.create_account("Alan", "Turing").await.unwrap();

    let updated = service.update_account(account.id, "Alonzo", "Church").await.unwrap();
    assert_eq!(updated.first_name, "Alonzo");

    let transferred = service.transfer(account.id, 750).await.unwrap();
    assert_eq!(transferred.balance, 750);

    let fetched = service.get_account(account.id).await.unwrap();
    assert_eq!(fetched.balance, 750);
    assert_eq!(fetched.last_name, "Church");
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_delete_and_not_found() {
    let service = create_test_service().await;
    let account = service.create_account("Grace", "Hopper").await.unwrap();

    service.delete_account(account.id).await.unwrap();
    // Second delete of the same id is still fine
    service.delete_account(account.id).await.unwrap();

    assert!(matches!(service.get_account(account.id).await, Err(Error::AccountNotFound(_))));
    assert!(matches!(service.transfer(account.id, 1).await, Err(Error::AccountNotFound(_))));
}
