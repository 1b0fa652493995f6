use std::{any::type_name_of_val, fmt, sync::Arc};

use tracing::{error, info};

use canopy_model::{Role, RoleId, User, UserId};

use crate::database::ports::roles::RolesStore;
use crate::outcome::Outcome;
use crate::user_management::application::directory::UserDirectory;

/// Moves a user between roles.
///
/// Reassigning the role a user already holds is rejected with
/// [`Outcome::Forbidden`] and never touches storage. A user deleted before
/// the write lands is reported as [`Outcome::NotFound`]. The read-compare-write
/// sequence carries no version guard, so two concurrent changes for the same
/// user can lose an update.
#[derive(Clone)]
pub struct RoleAssignment {
    directory: UserDirectory,
    roles: Arc<dyn RolesStore>,
}

impl fmt::Debug for RoleAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleAssignment")
            .field("directory", &self.directory)
            .field("roles", &type_name_of_val(self.roles.as_ref()))
            .finish()
    }
}

impl RoleAssignment {
    pub fn new(directory: UserDirectory, roles: Arc<dyn RolesStore>) -> Self {
        Self { directory, roles }
    }

    pub async fn change_role(&self, user_id: UserId, role_id: RoleId) -> Outcome<User> {
        self.try_change_role(user_id, role_id).await.into()
    }

    async fn try_change_role(
        &self,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<User, Outcome<User>> {
        let mut user = self.directory.get_by_id(user_id).await.into_result::<User>()?;
        let role = self.target_role(role_id).await?;

        if user.role_id() == role.id {
            return Err(Outcome::Forbidden);
        }

        let previous = user.role.name;
        user.role = role;
        let saved = self.directory.update(&user).await.into_result::<User>()?;

        info!(
            user_id = %saved.id,
            from = %previous,
            to = %saved.role.name,
            "changed user role"
        );
        Ok(saved)
    }

    async fn target_role(&self, role_id: RoleId) -> Result<Role, Outcome<User>> {
        match self.roles.find_by_id(role_id).await {
            Ok(Some(role)) => Ok(role),
            Ok(None) => {
                error!(role_id = %role_id, "role change targets an unknown role");
                Err(Outcome::InternalFault)
            }
            Err(err) => Err(Outcome::fault("change_role", &err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::role_bootstrap::RoleBootstrapService;
    use crate::database::{InMemoryRolesStore, InMemoryUsersStore};
    use canopy_model::{NewUser, RoleName};
    use chrono::Utc;

    async fn fixture() -> (RoleAssignment, UserDirectory, User) {
        let roles = Arc::new(InMemoryRolesStore::new());
        RoleBootstrapService::new(roles.clone())
            .ensure_defaults()
            .await
            .unwrap();

        let directory =
            UserDirectory::new(Arc::new(InMemoryUsersStore::new()), roles.clone());
        let user = directory
            .insert(NewUser::first_login(
                "Alice",
                "alice@x.com",
                Role::canonical(RoleName::RegisteredUsers),
                0,
                Utc::now(),
            ))
            .await
            .success()
            .unwrap();

        (RoleAssignment::new(directory.clone(), roles), directory, user)
    }

    #[tokio::test]
    async fn change_to_new_role_persists() {
        let (assignment, directory, user) = fixture().await;

        let updated = assignment
            .change_role(user.id, RoleId(2))
            .await
            .success()
            .expect("role changed");
        assert_eq!(updated.role.name, RoleName::Moderator);

        let stored = directory.get_by_id(user.id).await.success().unwrap();
        assert_eq!(stored.role.id, RoleId(2));
    }

    #[tokio::test]
    async fn same_role_is_forbidden_and_unchanged() {
        let (assignment, directory, user) = fixture().await;

        assert_eq!(
            assignment.change_role(user.id, RoleId(3)).await,
            Outcome::Forbidden
        );
        let stored = directory.get_by_id(user.id).await.success().unwrap();
        assert_eq!(stored, user);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (assignment, _, _) = fixture().await;

        assert_eq!(
            assignment.change_role(UserId(404), RoleId(1)).await,
            Outcome::NotFound
        );
    }

    #[tokio::test]
    async fn unknown_role_is_internal_fault() {
        let (assignment, directory, user) = fixture().await;

        assert_eq!(
            assignment.change_role(user.id, RoleId(42)).await,
            Outcome::InternalFault
        );
        let stored = directory.get_by_id(user.id).await.success().unwrap();
        assert_eq!(stored.role.id, RoleId(3));
    }
}
