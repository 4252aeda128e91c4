//! User entity: a principal that can log in with a username and password.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, used as the token subject
    pub id: Uuid,

    /// Natural login key
    pub username: String,

    /// Output of the password hasher; never the raw password
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub roles: Vec<String>,

    /// Inactive users cannot authenticate
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash: password_hash.into(),
            roles,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Token subject for this user
    pub fn subject(&self) -> String {
        self.id.to_string()
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
