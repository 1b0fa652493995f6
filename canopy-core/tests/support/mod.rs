#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use canopy_core::{InMemoryUsersStore, StoreError, StoreResult, UsersStore};
use canopy_model::{NewUser, Role, RoleId, RoleName, User, UserId};

fn unavailable() -> StoreError {
    StoreError::Unavailable("connection refused".into())
}

/// User store whose every call fails.
#[derive(Debug, Default)]
pub struct FailingUsersStore;

#[async_trait]
impl UsersStore for FailingUsersStore {
    async fn find_by_id(&self, _id: UserId) -> StoreResult<Option<User>> {
        Err(unavailable())
    }

    async fn find_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
        Err(unavailable())
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        Err(unavailable())
    }

    async fn find_by_name(&self, _display_name: &str) -> StoreResult<Vec<User>> {
        Err(unavailable())
    }

    async fn find_by_role_id(&self, _role_id: RoleId) -> StoreResult<Vec<User>> {
        Err(unavailable())
    }

    async fn find_blacklisted(&self) -> StoreResult<Vec<User>> {
        Err(unavailable())
    }

    async fn create(&self, _user: NewUser) -> StoreResult<User> {
        Err(unavailable())
    }

    async fn update(&self, _user: &User) -> StoreResult<Option<User>> {
        Err(unavailable())
    }

    async fn delete_by_id(&self, _id: UserId) -> StoreResult<bool> {
        Err(unavailable())
    }

    async fn count(&self) -> StoreResult<usize> {
        Err(unavailable())
    }
}

/// Wraps the in-memory store and misses the first email lookup, as if a
/// concurrent first login inserted the row right after that lookup ran.
#[derive(Debug, Default)]
pub struct RacingUsersStore {
    pub inner: InMemoryUsersStore,
    missed: AtomicBool,
}

#[async_trait]
impl UsersStore for RacingUsersStore {
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        if !self.missed.swap(true, Ordering::SeqCst) {
            return Ok(None);
        }
        self.inner.find_by_email(email).await
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        self.inner.find_all().await
    }

    async fn find_by_name(&self, display_name: &str) -> StoreResult<Vec<User>> {
        self.inner.find_by_name(display_name).await
    }

    async fn find_by_role_id(&self, role_id: RoleId) -> StoreResult<Vec<User>> {
        self.inner.find_by_role_id(role_id).await
    }

    async fn find_blacklisted(&self) -> StoreResult<Vec<User>> {
        self.inner.find_blacklisted().await
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        self.inner.create(user).await
    }

    async fn update(&self, user: &User) -> StoreResult<Option<User>> {
        self.inner.update(user).await
    }

    async fn delete_by_id(&self, id: UserId) -> StoreResult<bool> {
        self.inner.delete_by_id(id).await
    }

    async fn count(&self) -> StoreResult<usize> {
        self.inner.count().await
    }
}

/// Deletes each row right after handing it out from `find_by_id`, as if a
/// concurrent delete landed between a service's read and its write.
#[derive(Debug, Default)]
pub struct DeletingUsersStore {
    pub inner: InMemoryUsersStore,
}

#[async_trait]
impl UsersStore for DeletingUsersStore {
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let found = self.inner.find_by_id(id).await?;
        if found.is_some() {
            self.inner.delete_by_id(id).await?;
        }
        Ok(found)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.inner.find_by_email(email).await
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        self.inner.find_all().await
    }

    async fn find_by_name(&self, display_name: &str) -> StoreResult<Vec<User>> {
        self.inner.find_by_name(display_name).await
    }

    async fn find_by_role_id(&self, role_id: RoleId) -> StoreResult<Vec<User>> {
        self.inner.find_by_role_id(role_id).await
    }

    async fn find_blacklisted(&self) -> StoreResult<Vec<User>> {
        self.inner.find_blacklisted().await
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        self.inner.create(user).await
    }

    async fn update(&self, user: &User) -> StoreResult<Option<User>> {
        self.inner.update(user).await
    }

    async fn delete_by_id(&self, id: UserId) -> StoreResult<bool> {
        self.inner.delete_by_id(id).await
    }

    async fn count(&self) -> StoreResult<usize> {
        self.inner.count().await
    }
}

/// How [`ConflictingUsersStore`] answers email lookups after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryLookup {
    Miss,
    Fail,
}

/// Reports a conflict for every insert while holding no rows at all.
#[derive(Debug)]
pub struct ConflictingUsersStore {
    retry: RetryLookup,
    lookups: AtomicUsize,
}

impl ConflictingUsersStore {
    pub fn new(retry: RetryLookup) -> Self {
        Self {
            retry,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UsersStore for ConflictingUsersStore {
    async fn find_by_id(&self, _id: UserId) -> StoreResult<Option<User>> {
        Ok(None)
    }

    async fn find_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
        let previous = self.lookups.fetch_add(1, Ordering::SeqCst);
        if previous > 0 && self.retry == RetryLookup::Fail {
            return Err(unavailable());
        }
        Ok(None)
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        Ok(Vec::new())
    }

    async fn find_by_name(&self, _display_name: &str) -> StoreResult<Vec<User>> {
        Ok(Vec::new())
    }

    async fn find_by_role_id(&self, _role_id: RoleId) -> StoreResult<Vec<User>> {
        Ok(Vec::new())
    }

    async fn find_blacklisted(&self) -> StoreResult<Vec<User>> {
        Ok(Vec::new())
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        Err(StoreError::Conflict(format!(
            "email {} already exists",
            user.email
        )))
    }

    async fn update(&self, _user: &User) -> StoreResult<Option<User>> {
        Ok(None)
    }

    async fn delete_by_id(&self, _id: UserId) -> StoreResult<bool> {
        Ok(false)
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(0)
    }
}

pub fn registered(display_name: &str, email: &str) -> NewUser {
    NewUser::first_login(
        display_name,
        email,
        Role::canonical(RoleName::RegisteredUsers),
        0,
        chrono::Utc::now(),
    )
}
