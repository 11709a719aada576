//! Back-office user records.
//!
//! The table exists for a future login flow; nothing on the HTTP surface
//! reads or writes it yet.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Opaque credential string as handed to storage.
    #[serde(skip_serializing)]
    pub password: String,
}

/// Fields required to create a user. `username` must be unique.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    /// Attach the storage-assigned ID.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
        }
    }
}
