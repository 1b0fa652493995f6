use tracing::info;

use canopy_model::{User, UserId};

use crate::outcome::Outcome;
use crate::user_management::application::directory::UserDirectory;

/// Toggles the access-suppression flag.
///
/// Unlike role changes, writing the value a user already has is allowed and
/// succeeds every time. A user deleted between the read and the write stays
/// deleted and the call reports [`Outcome::NotFound`].
#[derive(Debug, Clone)]
pub struct BlacklistControl {
    directory: UserDirectory,
}

impl BlacklistControl {
    pub fn new(directory: UserDirectory) -> Self {
        Self { directory }
    }

    pub async fn set_blacklisted(&self, user_id: UserId, blacklisted: bool) -> Outcome<User> {
        let mut user = match self.directory.get_by_id(user_id).await.into_result() {
            Ok(user) => user,
            Err(failure) => return failure,
        };

        user.blacklisted = blacklisted;
        let saved = self.directory.update(&user).await;
        if saved.is_success() {
            info!(user_id = %user_id, blacklisted, "updated blacklist flag");
        }
        saved
    }

    pub async fn blacklist(&self, user_id: UserId) -> Outcome<User> {
        self.set_blacklisted(user_id, true).await
    }

    pub async fn unblacklist(&self, user_id: UserId) -> Outcome<User> {
        self.set_blacklisted(user_id, false).await
    }
}
