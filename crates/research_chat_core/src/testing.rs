//! crates/research_chat_core/src/testing.rs
//!
//! In-memory port implementations shared by the service tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::{ChatMessage, ChatSession, User, UserCredentials};
use crate::ports::{
    CollaboratorService, CredentialStore, PasswordService, PortError, PortResult, SessionStore,
    TokenService,
};

//=========================================================================================
// Stores
//=========================================================================================

#[derive(Default)]
pub struct MemCredentialStore {
    users: Mutex<Vec<UserCredentials>>,
}

#[async_trait]
impl CredentialStore for MemCredentialStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> PortResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(PortError::DuplicateUser);
        }
        let user_id = Uuid::new_v4();
        users.push(UserCredentials {
            user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        });
        Ok(User {
            user_id,
            email: email.to_string(),
        })
    }

    async fn user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", email)))
    }
}

/// A session/message store with a strictly monotonic clock, so recency
/// ordering is deterministic no matter how fast the test runs.
#[derive(Default)]
pub struct MemSessionStore {
    sessions: Mutex<Vec<ChatSession>>,
    messages: Mutex<Vec<ChatMessage>>,
    clock: AtomicI64,
}

impl MemSessionStore {
    fn tick(&self) -> DateTime<Utc> {
        let n = self.clock.fetch_add(1, Ordering::SeqCst);
        Utc.timestamp_opt(1_700_000_000 + n, 0).unwrap()
    }
}

#[async_trait]
impl SessionStore for MemSessionStore {
    async fn create_session(&self, user_id: Uuid, title: &str) -> PortResult<ChatSession> {
        let session = ChatSession {
            id: Uuid::new_v4(),
            user_id,
            title: title.to_string(),
            updated_at: self.tick(),
        };
        self.sessions.lock().unwrap().push(session.clone());
        Ok(session)
    }

    async fn session_by_id(&self, session_id: Uuid) -> PortResult<ChatSession> {
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == session_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Session {} not found", session_id)))
    }

    async fn sessions_for_user(&self, user_id: Uuid) -> PortResult<Vec<ChatSession>> {
        let mut sessions: Vec<ChatSession> = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }

    async fn append_message(&self, message: ChatMessage) -> PortResult<()> {
        self.messages.lock().unwrap().push(message);
        Ok(())
    }

    async fn messages_for_session(&self, session_id: Uuid) -> PortResult<Vec<ChatMessage>> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn touch_session(&self, session_id: Uuid) -> PortResult<()> {
        let now = self.tick();
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.iter_mut().find(|s| s.id == session_id) {
            Some(session) => {
                session.updated_at = now;
                Ok(())
            }
            None => Err(PortError::NotFound(format!(
                "Session {} not found",
                session_id
            ))),
        }
    }
}

//=========================================================================================
// Crypto stand-ins
//=========================================================================================

/// Reversible "hashing" so assertions stay readable.
pub struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash_password(&self, plaintext: &str) -> PortResult<String> {
        Ok(format!("hashed:{}", plaintext))
    }

    fn verify_password(&self, plaintext: &str, password_hash: &str) -> PortResult<bool> {
        Ok(password_hash == format!("hashed:{}", plaintext))
    }
}

/// Tokens that embed the user id directly.
pub struct StaticTokens;

impl TokenService for StaticTokens {
    fn issue(&self, user_id: Uuid) -> PortResult<String> {
        Ok(format!("token:{}", user_id))
    }

    fn verify(&self, token: &str) -> PortResult<Uuid> {
        token
            .strip_prefix("token:")
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .ok_or(PortError::Unauthenticated)
    }
}

//=========================================================================================
// Collaborators
//=========================================================================================

pub struct AnswerCall {
    pub question: String,
    pub history_len: usize,
}

/// A collaborator that always returns the same answer and records what it saw.
pub struct CannedCollaborator {
    answer: String,
    pub calls: Mutex<Vec<AnswerCall>>,
    pub seeded: Mutex<Vec<(Uuid, Vec<String>)>>,
}

impl CannedCollaborator {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            calls: Mutex::new(Vec::new()),
            seeded: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CollaboratorService for CannedCollaborator {
    async fn answer_question(
        &self,
        _session_id: Uuid,
        question: &str,
        history: &[ChatMessage],
    ) -> PortResult<String> {
        // Give interleaved callers a chance to run mid-exchange.
        tokio::task::yield_now().await;
        self.calls.lock().unwrap().push(AnswerCall {
            question: question.to_string(),
            history_len: history.len(),
        });
        Ok(self.answer.clone())
    }

    async fn process_sources(&self, session_id: Uuid, urls: &[String]) -> PortResult<()> {
        self.seeded
            .lock()
            .unwrap()
            .push((session_id, urls.to_vec()));
        Ok(())
    }
}

/// A collaborator that is always down.
pub struct FailingCollaborator;

#[async_trait]
impl CollaboratorService for FailingCollaborator {
    async fn answer_question(
        &self,
        _session_id: Uuid,
        _question: &str,
        _history: &[ChatMessage],
    ) -> PortResult<String> {
        Err(PortError::Upstream("collaborator unavailable".to_string()))
    }

    async fn process_sources(&self, _session_id: Uuid, _urls: &[String]) -> PortResult<()> {
        Err(PortError::Upstream("collaborator unavailable".to_string()))
    }
}
