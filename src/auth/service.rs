use std::sync::{Arc, OnceLock};

use super::password::{hash_password, verify_password};
use super::token::SessionKeys;
use crate::error::AppError;
use crate::models::{normalize_username, User};
use crate::store::DataStore;

/// A freshly issued session for a user.
#[derive(Debug, Clone)]
pub struct SessionToken {
    /// The lowercased username the session is bound to.
    pub username: String,
    /// Signed token to place in the session cookie.
    pub token: String,
}

/// Password checked against the decoy hash when a login names an unknown user.
const DECOY_PASSWORD: &str = "decoy-password";

/// Registration, login and session issuance.
pub struct AuthService {
    store: Arc<dyn DataStore>,
    keys: SessionKeys,
    bcrypt_cost: u32,
    decoy_hash: OnceLock<String>,
}

impl AuthService {
    pub fn new(store: Arc<dyn DataStore>, keys: SessionKeys, bcrypt_cost: u32) -> Self {
        Self {
            store,
            keys,
            bcrypt_cost,
            decoy_hash: OnceLock::new(),
        }
    }

    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// Creates an account and signs the new user in.
    ///
    /// Fails with `AppError::DuplicateUsername` if the lowercased name is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<SessionToken, AppError> {
        let username = normalize_username(username);
        if username.is_empty() {
            return Err(AppError::ValidationError("Username is required".into()));
        }

        if self.store.find_user(&username).await?.is_some() {
            log::info!("Registration refused, username taken: {}", username);
            return Err(AppError::DuplicateUsername);
        }

        let password_hash = hash_password(password, self.bcrypt_cost)?;
        // A concurrent registration can still win the race; the store reports it as a duplicate.
        self.store
            .insert_user(&User::new(&username, password_hash))
            .await?;

        log::info!("Registered user {}", username);
        self.session_for(username)
    }

    /// Verifies credentials and signs the user in.
    ///
    /// Unknown usernames and wrong passwords both fail with `AppError::InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionToken, AppError> {
        let username = normalize_username(username);

        let user = match self.store.find_user(&username).await? {
            Some(user) => user,
            None => {
                // Same bcrypt work as a wrong password, so timing does not reveal the account.
                let _ = verify_password(password, self.decoy_hash()?);
                log::warn!("Login failed for {}: unknown user", username);
                return Err(AppError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash)? {
            log::warn!("Login failed for {}: wrong password", username);
            return Err(AppError::InvalidCredentials);
        }

        log::info!("User {} logged in", username);
        self.session_for(user.username)
    }

    /// Ends a session. Tokens are stateless, so this only records the event;
    /// the handler clears the cookie.
    pub fn logout(&self, username: Option<&str>) {
        match username {
            Some(name) => log::info!("User {} logged out", name),
            None => log::debug!("Logout without an active session"),
        }
    }

    /// The stored record of the session user, if it still exists.
    pub async fn current_user(&self, username: &str) -> Result<Option<User>, AppError> {
        self.store.find_user(&normalize_username(username)).await
    }

    /// A hash at the configured cost, computed on first use.
    fn decoy_hash(&self) -> Result<&str, AppError> {
        if let Some(hash) = self.decoy_hash.get() {
            return Ok(hash);
        }
        let hash = hash_password(DECOY_PASSWORD, self.bcrypt_cost)?;
        Ok(self.decoy_hash.get_or_init(|| hash))
    }

    fn session_for(&self, username: String) -> Result<SessionToken, AppError> {
        let token = self.keys.issue(&username)?;
        Ok(SessionToken { username, token })
    }
}
