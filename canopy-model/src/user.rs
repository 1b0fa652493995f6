use chrono::{DateTime, Utc};

use crate::ids::{RoleId, UserId};
use crate::role::Role;

/// A persisted account record.
///
/// `email` is the identity key: at most one user exists per email.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub blacklisted: bool,
    pub last_login_location: i32,
    pub last_login_at: DateTime<Utc>,
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn role_id(&self) -> RoleId {
        self.role.id
    }
}

/// A fully-formed user that has not been assigned an id by storage yet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewUser {
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub blacklisted: bool,
    pub last_login_location: i32,
    pub last_login_at: DateTime<Utc>,
    pub registered_at: DateTime<Utc>,
}

impl NewUser {
    /// First-contact record: not blacklisted, both timestamps set to `now`.
    pub fn first_login(
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        location: i32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            role,
            blacklisted: false,
            last_login_location: location,
            last_login_at: now,
            registered_at: now,
        }
    }

    /// Attach the storage-assigned id.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            display_name: self.display_name,
            email: self.email,
            role: self.role,
            blacklisted: self.blacklisted,
            last_login_location: self.last_login_location,
            last_login_at: self.last_login_at,
            registered_at: self.registered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::RoleName;

    #[test]
    fn first_login_defaults() {
        let now = Utc::now();
        let new_user = NewUser::first_login(
            "Alice",
            "alice@x.com",
            Role::canonical(RoleName::RegisteredUsers),
            0,
            now,
        );

        assert!(!new_user.blacklisted);
        assert_eq!(new_user.last_login_at, now);
        assert_eq!(new_user.registered_at, now);

        let user = new_user.into_user(UserId(7));
        assert_eq!(user.id, UserId(7));
        assert_eq!(user.role_id(), RoleId(3));
        assert_eq!(user.email, "alice@x.com");
    }
}
