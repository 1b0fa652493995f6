//! # Canopy Core
//!
//! Service layer for account identity: provisioning a user record on first
//! contact from a verified identity claim, changing a user's role,
//! toggling the blacklist flag, and querying the directory of users.
//!
//! Every operation returns an [`Outcome`] (`Success`, `NotFound`,
//! `Forbidden` or `InternalFault`) and never lets a storage error escape.
//! Storage is reached through the [`UsersStore`] and [`RolesStore`] ports;
//! an in-memory adapter of both ships in [`database::memory`].
//!
//! ## Examples
//!
//! ```no_run
//! use canopy_config::Config;
//! use canopy_core::{Outcome, UserServices};
//! use canopy_model::RoleId;
//!
//! async fn first_login() -> anyhow::Result<()> {
//!     let services = UserServices::in_memory(&Config::default()).await?;
//!
//!     if let Outcome::Success(user) = services
//!         .provisioner()
//!         .resolve("Alice", "alice@x.com")
//!         .await
//!     {
//!         let promoted = services.role_assignment().change_role(user.id, RoleId(2)).await;
//!         println!("promotion: {}", promoted.kind());
//!     }
//!     Ok(())
//! }
//! ```
// TODO: Document the remaining public items and drop this allow
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Startup seeding and the service bundle
pub mod application;

/// Storage ports and the in-memory adapter
pub mod database;

/// Storage error type
pub mod error;

/// The four-way result envelope
pub mod outcome;

/// Directory, provisioning, role and blacklist services
pub mod user_management;

pub use application::{RoleBootstrapService, SeedReport, UserServices};
pub use database::{InMemoryRolesStore, InMemoryUsersStore, RolesStore, UsersStore};
pub use error::{StoreError, StoreResult};
pub use outcome::{Outcome, OutcomeKind};
pub use user_management::{
    BlacklistControl, DEFAULT_ROLE, IdentityProvisioner, RoleAssignment, UserDirectory,
};
