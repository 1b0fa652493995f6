//! Storage collaborator ports and the bundled in-memory adapter.

pub mod memory;
pub mod ports;

pub use memory::{InMemoryRolesStore, InMemoryUsersStore};
pub use ports::{roles::RolesStore, users::UsersStore};
