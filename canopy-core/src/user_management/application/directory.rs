use std::{any::type_name_of_val, fmt, sync::Arc};

use tracing::{error, info};

use canopy_model::{NewUser, Role, RoleId, User, UserId};

use crate::database::ports::{roles::RolesStore, users::UsersStore};
use crate::error::StoreResult;
use crate::outcome::Outcome;

/// Read, write and query operations over user records.
///
/// Every operation traps store faults and reports them as
/// [`Outcome::InternalFault`]. Writes only go through for users whose role
/// is present in the role store.
#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<dyn UsersStore>,
    roles: Arc<dyn RolesStore>,
}

impl fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDirectory")
            .field("users", &type_name_of_val(self.users.as_ref()))
            .field("roles", &type_name_of_val(self.roles.as_ref()))
            .finish()
    }
}

impl UserDirectory {
    pub fn new(users: Arc<dyn UsersStore>, roles: Arc<dyn RolesStore>) -> Self {
        Self { users, roles }
    }

    pub async fn get_by_id(&self, id: UserId) -> Outcome<User> {
        found("get_by_id", self.users.find_by_id(id).await)
    }

    pub async fn get_by_email(&self, email: &str) -> Outcome<User> {
        found("get_by_email", self.users.find_by_email(email).await)
    }

    pub async fn list_all(&self) -> Outcome<Vec<User>> {
        listed("list_all", self.users.find_all().await)
    }

    /// Users whose display name matches `name`, as the store defines a match.
    pub async fn list_by_name(&self, name: &str) -> Outcome<Vec<User>> {
        listed("list_by_name", self.users.find_by_name(name).await)
    }

    pub async fn list_by_role(&self, role_id: RoleId) -> Outcome<Vec<User>> {
        listed("list_by_role", self.users.find_by_role_id(role_id).await)
    }

    pub async fn list_blacklisted(&self) -> Outcome<Vec<User>> {
        listed("list_blacklisted", self.users.find_blacklisted().await)
    }

    pub async fn count(&self) -> Outcome<usize> {
        match self.users.count().await {
            Ok(count) => Outcome::Success(count),
            Err(err) => Outcome::fault("count", &err),
        }
    }

    /// Persist a fully-formed user and return it with its storage id.
    ///
    /// A role that is not in the role store is an [`Outcome::InternalFault`]
    /// and nothing is written.
    pub async fn insert(&self, user: NewUser) -> Outcome<User> {
        if let Err(failure) = self.ensure_role("insert", &user.role).await {
            return failure;
        }

        match self.create(user).await {
            Ok(user) => Outcome::Success(user),
            Err(err) => Outcome::fault("insert", &err),
        }
    }

    pub async fn delete_by_id(&self, id: UserId) -> Outcome<()> {
        let user = match self.get_by_id(id).await.into_result() {
            Ok(user) => user,
            Err(failure) => return failure,
        };

        match self.users.delete_by_id(user.id).await {
            Ok(true) => {
                info!(user_id = %id, "deleted user");
                Outcome::Success(())
            }
            // Removed by someone else between the lookup and the delete
            Ok(false) => Outcome::NotFound,
            Err(err) => Outcome::fault("delete_by_id", &err),
        }
    }

    /// Raw create, leaving conflict handling to the caller.
    pub(crate) async fn create(&self, user: NewUser) -> StoreResult<User> {
        self.users.create(user).await
    }

    /// Write back a user read earlier. A record deleted in the meantime is
    /// reported as [`Outcome::NotFound`] and stays deleted.
    pub(crate) async fn update(&self, user: &User) -> Outcome<User> {
        match self.users.update(user).await {
            Ok(Some(updated)) => Outcome::Success(updated),
            Ok(None) => Outcome::NotFound,
            Err(err) => Outcome::fault("update", &err),
        }
    }

    async fn ensure_role(
        &self,
        operation: &'static str,
        role: &Role,
    ) -> Result<(), Outcome<User>> {
        match self.roles.find_by_id(role.id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => {
                error!(
                    operation,
                    role_id = %role.id,
                    "user references a role missing from the role store"
                );
                Err(Outcome::InternalFault)
            }
            Err(err) => Err(Outcome::fault(operation, &err)),
        }
    }
}

fn found(operation: &'static str, result: StoreResult<Option<User>>) -> Outcome<User> {
    match result {
        Ok(Some(user)) => Outcome::Success(user),
        Ok(None) => Outcome::NotFound,
        Err(err) => Outcome::fault(operation, &err),
    }
}

fn listed(
    operation: &'static str,
    result: StoreResult<Vec<User>>,
) -> Outcome<Vec<User>> {
    match result {
        Ok(users) => Outcome::Success(users),
        Err(err) => Outcome::fault(operation, &err),
    }
}
