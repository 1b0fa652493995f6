//! Application-level composition: startup seeding and the service bundle.

pub mod role_bootstrap;
pub mod services;

pub use role_bootstrap::{RoleBootstrapService, SeedReport};
pub use services::UserServices;
