//! Main authentication service implementation

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::RefreshClaims;
use crate::domain::entities::user::User;
use crate::domain::value_objects::Credentials;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{RefreshSessionRepository, UserRepository};

use super::hasher::PasswordHasher;

/// Validates login credentials and resolves refresh cookie owners
///
/// Every rejection except malformed input is the same opaque
/// `Unauthorized`; the reason is only logged.
pub struct AuthenticationService<U, R, H>
where
    U: UserRepository,
    R: RefreshSessionRepository,
    H: PasswordHasher + 'static,
{
    /// User lookup by username and id
    user_repository: Arc<U>,
    /// Session lookup by cookie hash
    session_repository: Arc<R>,
    /// Password hash comparison, run off the async executor
    hasher: Arc<H>,
}

impl<U, R, H> AuthenticationService<U, R, H>
where
    U: UserRepository,
    R: RefreshSessionRepository,
    H: PasswordHasher + 'static,
{
    pub fn new(user_repository: Arc<U>, session_repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            user_repository,
            session_repository,
            hasher,
        }
    }

    /// Checks a username/password pair and returns the matching user
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::BadInput)` - Username or password missing
    /// * `Err(DomainError::Unauthorized)` - Unknown user, inactive user or wrong password
    pub async fn authenticate(&self, credentials: &Credentials) -> DomainResult<User> {
        if !credentials.is_complete() {
            return Err(DomainError::bad_input("username and password are required"));
        }
        let username = credentials.username.trim();

        let user = match self.user_repository.find_by_username(username).await? {
            Some(user) => user,
            None => {
                debug!(username = %username, "login rejected: unknown user");
                return Err(DomainError::Unauthorized);
            }
        };

        if !user.is_active {
            debug!(subject = %user.id, "login rejected: inactive user");
            return Err(DomainError::Unauthorized);
        }

        let hasher = self.hasher.clone();
        let password = credentials.password.clone();
        let password_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|e| DomainError::internal(format!("password check aborted: {}", e)))??;

        if !matches {
            debug!(subject = %user.id, "login rejected: password mismatch");
            return Err(DomainError::Unauthorized);
        }

        info!(subject = %user.id, "user authenticated");
        Ok(user)
    }

    /// Finds the user owning the session that refresh `claims` belong to
    pub async fn resolve_subject_from_refresh_claims(
        &self,
        claims: &RefreshClaims,
    ) -> DomainResult<User> {
        let hash = claims.hash()?;

        let session = match self.session_repository.find_by_hash(&hash).await? {
            Some(session) => session,
            None => {
                warn!(jti = %claims.jti, "refresh rejected: session not found");
                return Err(DomainError::Unauthorized);
            }
        };

        let user = match Uuid::parse_str(&session.subject) {
            Ok(id) => self.user_repository.find_by_id(id).await?,
            Err(_) => None,
        };

        match user {
            Some(user) => Ok(user),
            None => {
                warn!(subject = %session.subject, "refresh rejected: subject not found");
                Err(DomainError::Unauthorized)
            }
        }
    }
}
