use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use canopy_config::Config;

use crate::application::role_bootstrap::RoleBootstrapService;
use crate::database::{
    InMemoryRolesStore, InMemoryUsersStore, RolesStore, UsersStore,
};
use crate::user_management::{
    BlacklistControl, IdentityProvisioner, RoleAssignment, UserDirectory,
};

/// The service objects a process builds once at startup and hands to its
/// request handlers.
#[derive(Debug, Clone)]
pub struct UserServices {
    directory: UserDirectory,
    provisioner: IdentityProvisioner,
    role_assignment: RoleAssignment,
    blacklist: BlacklistControl,
}

impl UserServices {
    /// Seed the role table, then wire every service onto the given stores.
    pub async fn bootstrap(
        config: &Config,
        users: Arc<dyn UsersStore>,
        roles: Arc<dyn RolesStore>,
    ) -> anyhow::Result<Self> {
        RoleBootstrapService::new(roles.clone())
            .ensure_defaults()
            .await
            .context("failed to seed role table")?;

        let directory = UserDirectory::new(users, roles.clone());
        let services = Self {
            provisioner: IdentityProvisioner::new(
                directory.clone(),
                roles.clone(),
                &config.provisioning,
            ),
            role_assignment: RoleAssignment::new(directory.clone(), roles),
            blacklist: BlacklistControl::new(directory.clone()),
            directory,
        };

        info!("user services ready");
        Ok(services)
    }

    /// Bootstrap against fresh process-local stores.
    pub async fn in_memory(config: &Config) -> anyhow::Result<Self> {
        Self::bootstrap(
            config,
            Arc::new(InMemoryUsersStore::new()),
            Arc::new(InMemoryRolesStore::new()),
        )
        .await
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn provisioner(&self) -> &IdentityProvisioner {
        &self.provisioner
    }

    pub fn role_assignment(&self) -> &RoleAssignment {
        &self.role_assignment
    }

    pub fn blacklist(&self) -> &BlacklistControl {
        &self.blacklist
    }
}
