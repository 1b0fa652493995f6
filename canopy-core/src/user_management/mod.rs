//! User Management Module
//!
//! Application services that look up, provision and mutate user records:
//! the directory of read/write/query operations, identity provisioning on
//! first contact, role changes and the blacklist flag.

pub mod application;

pub use application::{
    BlacklistControl, DEFAULT_ROLE, IdentityProvisioner, RoleAssignment, UserDirectory,
};
