use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use canopy_model::{NewUser, Role, RoleId, RoleName, User, UserId};

use crate::database::ports::{roles::RolesStore, users::UsersStore};
use crate::error::{StoreError, StoreResult};

/// Process-local user store.
///
/// Ids are assigned from a monotonically increasing counter and never
/// reused after a delete. Email uniqueness is enforced on both `create`
/// and `update`.
#[derive(Debug, Default)]
pub struct InMemoryUsersStore {
    state: RwLock<UsersState>,
}

#[derive(Debug, Default)]
struct UsersState {
    last_id: i64,
    rows: BTreeMap<UserId, User>,
}

impl UsersState {
    fn email_taken_by_other(&self, email: &str, id: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|row| row.email == email && Some(row.id) != id)
    }

    fn select<F>(&self, predicate: F) -> Vec<User>
    where
        F: Fn(&User) -> bool,
    {
        self.rows.values().filter(|row| predicate(row)).cloned().collect()
    }
}

impl InMemoryUsersStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsersStore for InMemoryUsersStore {
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.rows.values().find(|row| row.email == email).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        Ok(self.state.read().await.select(|_| true))
    }

    async fn find_by_name(&self, display_name: &str) -> StoreResult<Vec<User>> {
        Ok(self
            .state
            .read()
            .await
            .select(|row| row.display_name == display_name))
    }

    async fn find_by_role_id(&self, role_id: RoleId) -> StoreResult<Vec<User>> {
        Ok(self.state.read().await.select(|row| row.role_id() == role_id))
    }

    async fn find_blacklisted(&self) -> StoreResult<Vec<User>> {
        Ok(self.state.read().await.select(|row| row.blacklisted))
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut state = self.state.write().await;
        if state.email_taken_by_other(&user.email, None) {
            return Err(StoreError::Conflict(format!(
                "email {} already exists",
                user.email
            )));
        }

        state.last_id += 1;
        let user = user.into_user(UserId(state.last_id));
        state.rows.insert(user.id, user.clone());
        debug!(user_id = %user.id, "inserted user row");
        Ok(user)
    }

    async fn update(&self, user: &User) -> StoreResult<Option<User>> {
        let mut state = self.state.write().await;
        if !state.rows.contains_key(&user.id) {
            return Ok(None);
        }
        if state.email_taken_by_other(&user.email, Some(user.id)) {
            return Err(StoreError::Conflict(format!(
                "email {} already exists",
                user.email
            )));
        }

        state.rows.insert(user.id, user.clone());
        Ok(Some(user.clone()))
    }

    async fn delete_by_id(&self, id: UserId) -> StoreResult<bool> {
        Ok(self.state.write().await.rows.remove(&id).is_some())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.state.read().await.rows.len())
    }
}

/// Process-local role store.
#[derive(Debug, Default)]
pub struct InMemoryRolesStore {
    rows: RwLock<BTreeMap<RoleId, Role>>,
}

impl InMemoryRolesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RolesStore for InMemoryRolesStore {
    async fn find_by_id(&self, id: RoleId) -> StoreResult<Option<Role>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: RoleName) -> StoreResult<Option<Role>> {
        let rows = self.rows.read().await;
        Ok(rows.values().find(|role| role.name == name).cloned())
    }

    async fn save(&self, role: &Role) -> StoreResult<Role> {
        self.rows.write().await.insert(role.id, role.clone());
        Ok(role.clone())
    }
}
