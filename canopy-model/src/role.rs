//! Fixed role set.
//!
//! Roles are never created or removed at runtime. The canonical table below
//! is applied once at startup by the role bootstrap in `canopy-core`, and
//! every user references exactly one of these rows.

use std::fmt;
use std::str::FromStr;

use crate::ids::RoleId;

/// Name of a permission tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RoleName {
    /// Full administrative access
    Admin,
    /// Can moderate content and other users
    Moderator,
    /// Default tier for every provisioned account
    RegisteredUsers,
}

impl RoleName {
    /// Get all role names in canonical id order
    pub fn all() -> &'static [RoleName] {
        &[RoleName::Admin, RoleName::Moderator, RoleName::RegisteredUsers]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "ADMIN",
            RoleName::Moderator => "MODERATOR",
            RoleName::RegisteredUsers => "REGISTERED_USERS",
        }
    }

    /// Id this role is seeded with.
    pub fn canonical_id(&self) -> RoleId {
        match self {
            RoleName::Admin => RoleId(1),
            RoleName::Moderator => RoleId(2),
            RoleName::RegisteredUsers => RoleId(3),
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(RoleName::Admin),
            "MODERATOR" => Ok(RoleName::Moderator),
            "REGISTERED_USERS" => Ok(RoleName::RegisteredUsers),
            _ => Err(format!("Invalid role name: {}", s)),
        }
    }
}

/// A persisted role row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
}

impl Role {
    pub fn new(id: RoleId, name: RoleName) -> Self {
        Self { id, name }
    }

    /// The row this name is seeded as.
    pub fn canonical(name: RoleName) -> Self {
        Self {
            id: name.canonical_id(),
            name,
        }
    }
}

/// Static seed table: ADMIN = 1, MODERATOR = 2, REGISTERED_USERS = 3.
pub const CANONICAL_ROLES: [Role; 3] = [
    Role {
        id: RoleId(1),
        name: RoleName::Admin,
    },
    Role {
        id: RoleId(2),
        name: RoleName::Moderator,
    },
    Role {
        id: RoleId(3),
        name: RoleName::RegisteredUsers,
    },
];
