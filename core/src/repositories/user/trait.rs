//! User repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Lookup contract for login principals
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by its natural key
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id (the token subject)
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a user
    ///
    /// # Returns
    /// * `Err(DomainError::BadInput)` - Username already taken
    async fn create(&self, user: User) -> Result<User, DomainError>;
}
