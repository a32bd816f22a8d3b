use serde::{Deserialize, Serialize};

/// A registered user as stored in the `users` collection.
///
/// `username` is always lowercase; it is the user's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    pub fn new(username: &str, password_hash: String) -> Self {
        Self {
            username: normalize_username(username),
            password_hash,
        }
    }
}

/// Usernames are case-insensitive and stored lowercased.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}
