//! crates/research_chat_core/src/auth.rs
//!
//! Account registration, credential verification, and token validation.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::ports::{CredentialStore, PasswordService, PortError, PortResult, TokenService};

//=========================================================================================
// AuthService
//=========================================================================================

/// The authentication service. Holds no state beyond its injected ports.
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    /// Creates a new `AuthService` over the given ports.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            credentials,
            passwords,
            tokens,
        }
    }

    /// Registers a new account and returns its id.
    pub async fn signup(&self, email: &str, password: &str) -> PortResult<Uuid> {
        let email = email.trim();
        if email.is_empty() {
            return Err(PortError::Validation("email is required".to_string()));
        }
        if password.is_empty() {
            return Err(PortError::Validation("password is required".to_string()));
        }

        let password_hash = self.passwords.hash_password(password)?;
        let user = self.credentials.create_user(email, &password_hash).await?;
        info!("Created user {}", user.user_id);
        Ok(user.user_id)
    }

    /// Verifies credentials and issues a signed bearer token.
    ///
    /// An unknown email and a wrong password produce the same error, so a
    /// caller can never probe which addresses have accounts.
    pub async fn login(&self, email: &str, password: &str) -> PortResult<String> {
        let creds = match self.credentials.user_by_email(email.trim()).await {
            Ok(creds) => creds,
            Err(PortError::NotFound(_)) => return Err(PortError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        if !self
            .passwords
            .verify_password(password, &creds.password_hash)?
        {
            return Err(PortError::InvalidCredentials);
        }

        self.tokens.issue(creds.user_id)
    }

    /// Validates a bearer token and returns the user id it is bound to.
    pub fn verify(&self, token: &str) -> PortResult<Uuid> {
        self.tokens.verify(token)
    }
}

//=========================================================================================
// Tests
//=========================================================================================
