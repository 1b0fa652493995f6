use async_trait::async_trait;

use canopy_model::{NewUser, RoleId, User, UserId};

use crate::error::StoreResult;

/// Persistence of user records.
///
/// Implementations own id assignment and must reject a second record for an
/// email that is already stored with [`StoreError::Conflict`].
///
/// [`StoreError::Conflict`]: crate::error::StoreError::Conflict
#[async_trait]
pub trait UsersStore: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn find_all(&self) -> StoreResult<Vec<User>>;
    async fn find_by_name(&self, display_name: &str) -> StoreResult<Vec<User>>;
    async fn find_by_role_id(&self, role_id: RoleId) -> StoreResult<Vec<User>>;
    async fn find_blacklisted(&self) -> StoreResult<Vec<User>>;

    /// Insert a new record and return it with its assigned id.
    async fn create(&self, user: NewUser) -> StoreResult<User>;
    /// Replace the record with `user.id`. Returns `None` without writing
    /// when no such record exists.
    async fn update(&self, user: &User) -> StoreResult<Option<User>>;
    /// Returns `false` when no record had that id.
    async fn delete_by_id(&self, id: UserId) -> StoreResult<bool>;
    async fn count(&self) -> StoreResult<usize>;
}
