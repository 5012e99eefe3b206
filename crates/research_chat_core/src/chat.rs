//! crates/research_chat_core/src/chat.rs
//!
//! Session and message operations, including the question/answer exchange
//! with the external research collaborator.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{ChatMessage, ChatSession};
use crate::ports::{CollaboratorService, PortError, PortResult, SessionStore};

/// Title given to sessions created without one.
pub const DEFAULT_SESSION_TITLE: &str = "New Research";

//=========================================================================================
// ChatService
//=========================================================================================

pub struct ChatService {
    sessions: Arc<dyn SessionStore>,
    collaborator: Arc<dyn CollaboratorService>,
    send_locks: SessionLocks,
}

impl ChatService {
    /// Creates a new `ChatService` over the given ports.
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        collaborator: Arc<dyn CollaboratorService>,
    ) -> Self {
        Self {
            sessions,
            collaborator,
            send_locks: SessionLocks::default(),
        }
    }

    /// Creates a session owned by `user_id`. A missing or blank title falls
    /// back to [`DEFAULT_SESSION_TITLE`].
    pub async fn create_session(&self, user_id: Uuid, title: Option<&str>) -> PortResult<Uuid> {
        let title = match title.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_SESSION_TITLE,
        };
        let session = self.sessions.create_session(user_id, title).await?;
        info!("Created session {} for user {}", session.id, user_id);
        Ok(session.id)
    }

    /// Lists the caller's sessions, most recently updated first.
    pub async fn list_sessions(&self, user_id: Uuid) -> PortResult<Vec<ChatSession>> {
        self.sessions.sessions_for_user(user_id).await
    }

    /// Returns a session's messages in creation order.
    pub async fn list_messages(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> PortResult<Vec<ChatMessage>> {
        self.owned_session(user_id, session_id).await?;
        self.sessions.messages_for_session(session_id).await
    }

    /// Runs one question/answer exchange and returns the collaborator's answer.
    ///
    /// The user message is committed before the collaborator is called, and the
    /// answer is committed before this returns. When the collaborator fails,
    /// the question stays recorded with no answer following it; a retry will
    /// resend the full history including that orphaned question.
    pub async fn send_message(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        text: &str,
    ) -> PortResult<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PortError::Validation("message is required".to_string()));
        }
        self.owned_session(user_id, session_id).await?;

        // One exchange at a time per session, so concurrent sends cannot read
        // each other's half-finished history.
        let _exchange = self.send_locks.acquire(session_id).await;

        self.sessions
            .append_message(ChatMessage::user(session_id, text))
            .await?;

        let history = self.sessions.messages_for_session(session_id).await?;
        let answer = match self
            .collaborator
            .answer_question(session_id, text, &history)
            .await
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!(
                    "Collaborator call failed for session {}: {}. The question stays recorded without an answer.",
                    session_id, e
                );
                return Err(e);
            }
        };

        self.sessions
            .append_message(ChatMessage::ai(session_id, answer.clone()))
            .await?;
        self.sessions.touch_session(session_id).await?;

        Ok(answer)
    }

    /// Seeds the collaborator's knowledge base for a session from source URLs.
    pub async fn seed_sources(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        urls: &[String],
    ) -> PortResult<()> {
        if urls.is_empty() || urls.iter().any(|u| u.trim().is_empty()) {
            return Err(PortError::Validation(
                "at least one non-empty url is required".to_string(),
            ));
        }
        self.owned_session(user_id, session_id).await?;
        self.collaborator.process_sources(session_id, urls).await
    }

    /// Loads the session and checks the caller owns it. A foreign session is
    /// reported exactly like a missing one.
    async fn owned_session(&self, user_id: Uuid, session_id: Uuid) -> PortResult<ChatSession> {
        let session = self.sessions.session_by_id(session_id).await?;
        if session.user_id != user_id {
            warn!(
                "User {} tried to access session {} owned by another user",
                user_id, session_id
            );
            return Err(PortError::NotFound(format!(
                "Session {} not found",
                session_id
            )));
        }
        Ok(session)
    }
}

//=========================================================================================
// Per-session send serialization
//=========================================================================================

/// One async mutex per session id. Entries are kept for the process lifetime;
/// sessions are never deleted.
#[derive(Default)]
struct SessionLocks {
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    async fn acquire(&self, session_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(session_id).or_default().clone()
        };
        lock.lock_owned().await
    }
}

//=========================================================================================
// Tests
//=========================================================================================
