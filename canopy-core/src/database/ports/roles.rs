use async_trait::async_trait;

use canopy_model::{Role, RoleId, RoleName};

use crate::error::StoreResult;

// Role lookups; `save` is only used by the startup seed
#[async_trait]
pub trait RolesStore: Send + Sync {
    async fn find_by_id(&self, id: RoleId) -> StoreResult<Option<Role>>;
    async fn find_by_name(&self, name: RoleName) -> StoreResult<Option<Role>>;
    async fn save(&self, role: &Role) -> StoreResult<Role>;
}
