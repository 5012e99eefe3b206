//! crates/research_chat_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ChatMessage, ChatSession, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("User already exists")]
    DuplicateUser,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unauthenticated")]
    Unauthenticated,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Upstream service failed: {0}")]
    Upstream(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Store Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Inserts a new user row. Fails with [`PortError::DuplicateUser`] when the
    /// email is already taken.
    async fn create_user(&self, email: &str, password_hash: &str) -> PortResult<User>;

    async fn user_by_email(&self, email: &str) -> PortResult<UserCredentials>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, user_id: Uuid, title: &str) -> PortResult<ChatSession>;

    async fn session_by_id(&self, session_id: Uuid) -> PortResult<ChatSession>;

    /// All sessions owned by the user, most recently updated first.
    async fn sessions_for_user(&self, user_id: Uuid) -> PortResult<Vec<ChatSession>>;

    async fn append_message(&self, message: ChatMessage) -> PortResult<()>;

    /// All messages of a session in creation order, insertion order on ties.
    async fn messages_for_session(&self, session_id: Uuid) -> PortResult<Vec<ChatMessage>>;

    /// Bumps the session's `updated_at` to the current time.
    async fn touch_session(&self, session_id: Uuid) -> PortResult<()>;
}

//=========================================================================================
// External Service Ports
//=========================================================================================

#[async_trait]
pub trait CollaboratorService: Send + Sync {
    /// Asks the research collaborator to answer a question, given the full
    /// prior message history of the session.
    async fn answer_question(
        &self,
        session_id: Uuid,
        question: &str,
        history: &[ChatMessage],
    ) -> PortResult<String>;

    /// Seeds the collaborator's knowledge base for a session from source URLs.
    async fn process_sources(&self, session_id: Uuid, urls: &[String]) -> PortResult<()>;
}

/// Hashes and verifies passwords. Verification must run in constant time
/// with respect to the candidate password.
pub trait PasswordService: Send + Sync {
    fn hash_password(&self, plaintext: &str) -> PortResult<String>;

    fn verify_password(&self, plaintext: &str, password_hash: &str) -> PortResult<bool>;
}

/// Issues and validates the signed bearer tokens that gate the chat routes.
pub trait TokenService: Send + Sync {
    fn issue(&self, user_id: Uuid) -> PortResult<String>;

    fn verify(&self, token: &str) -> PortResult<Uuid>;
}
