pub mod auth;
pub mod chat;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::AuthService;
pub use chat::{ChatService, DEFAULT_SESSION_TITLE};
pub use domain::{ChatMessage, ChatSession, MessageRole, User, UserCredentials};
pub use ports::{
    CollaboratorService, CredentialStore, PasswordService, PortError, PortResult, SessionStore,
    TokenService,
};
