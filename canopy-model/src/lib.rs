//! Core data model definitions shared across Canopy crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod ids;
pub mod role;
pub mod user;

pub use ids::{RoleId, UserId};
pub use role::{CANONICAL_ROLES, Role, RoleName};
pub use user::{NewUser, User};
