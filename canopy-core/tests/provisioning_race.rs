mod support;

use std::sync::Arc;

use canopy_config::Config;
use canopy_core::{InMemoryRolesStore, Outcome, UserServices, UsersStore};

use support::{ConflictingUsersStore, RacingUsersStore, RetryLookup};

async fn services_over(users: Arc<ConflictingUsersStore>) -> UserServices {
    UserServices::bootstrap(
        &Config::default(),
        users,
        Arc::new(InMemoryRolesStore::new()),
    )
    .await
    .expect("bootstrap services")
}

#[tokio::test]
async fn conflicting_insert_returns_the_existing_user() {
    let users = Arc::new(RacingUsersStore::default());
    let existing = users
        .inner
        .create(support::registered("Alice", "alice@x.com"))
        .await
        .expect("seed existing row");

    let services = UserServices::bootstrap(
        &Config::default(),
        users.clone(),
        Arc::new(InMemoryRolesStore::new()),
    )
    .await
    .expect("bootstrap services");

    let resolved = services
        .provisioner()
        .resolve("Alice Again", "alice@x.com")
        .await
        .success()
        .expect("conflict resolves to the stored user");

    assert_eq!(resolved, existing);
    assert_eq!(users.count().await.unwrap(), 1);
}

#[tokio::test]
async fn conflict_without_a_stored_user_is_internal_fault() {
    let users = Arc::new(ConflictingUsersStore::new(RetryLookup::Miss));
    let services = services_over(users.clone()).await;

    assert_eq!(
        services.provisioner().resolve("Alice", "alice@x.com").await,
        Outcome::InternalFault
    );
    assert_eq!(users.lookups(), 2);
}

#[tokio::test]
async fn failed_re_read_after_conflict_is_internal_fault() {
    let users = Arc::new(ConflictingUsersStore::new(RetryLookup::Fail));
    let services = services_over(users.clone()).await;

    assert_eq!(
        services.provisioner().resolve("Alice", "alice@x.com").await,
        Outcome::InternalFault
    );
    assert_eq!(users.lookups(), 2);
}
