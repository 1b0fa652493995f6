pub mod blacklist;
pub mod directory;
pub mod provisioner;
pub mod role_assignment;

pub use blacklist::BlacklistControl;
pub use directory::UserDirectory;
pub use provisioner::{DEFAULT_ROLE, IdentityProvisioner};
pub use role_assignment::RoleAssignment;
