use std::{fmt, sync::Arc};

use chrono::Utc;
use tracing::{error, info, warn};

use canopy_config::ProvisioningConfig;
use canopy_model::{NewUser, Role, RoleName, User};

use crate::database::ports::roles::RolesStore;
use crate::outcome::Outcome;
use crate::user_management::application::directory::UserDirectory;

/// Role every account is created with.
pub const DEFAULT_ROLE: RoleName = RoleName::RegisteredUsers;

/// Resolves a verified identity claim to a user record, creating the record
/// on first contact.
#[derive(Clone)]
pub struct IdentityProvisioner {
    directory: UserDirectory,
    roles: Arc<dyn RolesStore>,
    initial_login_location: i32,
}

impl fmt::Debug for IdentityProvisioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityProvisioner")
            .field("directory", &self.directory)
            .field("roles_repo", &Arc::strong_count(&self.roles))
            .field("initial_login_location", &self.initial_login_location)
            .finish()
    }
}

impl IdentityProvisioner {
    pub fn new(
        directory: UserDirectory,
        roles: Arc<dyn RolesStore>,
        config: &ProvisioningConfig,
    ) -> Self {
        Self {
            directory,
            roles,
            initial_login_location: config.initial_login_location,
        }
    }

    /// Return the user for `email`, provisioning one if none exists.
    ///
    /// An existing record is returned unchanged; `display_name` is only used
    /// when creating.
    pub async fn resolve(&self, display_name: &str, email: &str) -> Outcome<User> {
        match self.directory.get_by_email(email).await {
            Outcome::NotFound => {}
            existing => return existing,
        }

        let role = match self.default_role().await {
            Ok(role) => role,
            Err(failure) => return failure,
        };

        let new_user = NewUser::first_login(
            display_name,
            email,
            role,
            self.initial_login_location,
            Utc::now(),
        );

        match self.directory.create(new_user).await {
            Ok(user) => {
                info!(user_id = %user.id, email = %user.email, "provisioned user");
                Outcome::Success(user)
            }
            Err(err) if err.is_conflict() => {
                // A concurrent first login for the same email won the insert.
                warn!(email = %email, "provisioning raced; re-reading existing user");
                match self.directory.get_by_email(email).await {
                    Outcome::NotFound => {
                        error!(
                            email = %email,
                            "store reported a conflict but holds no user for the email"
                        );
                        Outcome::InternalFault
                    }
                    other => other,
                }
            }
            Err(err) => Outcome::fault("resolve", &err),
        }
    }

    async fn default_role(&self) -> Result<Role, Outcome<User>> {
        match self.roles.find_by_name(DEFAULT_ROLE).await {
            Ok(Some(role)) => Ok(role),
            Ok(None) => {
                error!(role = %DEFAULT_ROLE, "default role missing; was the role table seeded?");
                Err(Outcome::InternalFault)
            }
            Err(err) => Err(Outcome::fault("resolve", &err)),
        }
    }
}
