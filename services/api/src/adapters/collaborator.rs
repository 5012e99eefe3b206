//! services/api/src/adapters/collaborator.rs
//!
//! This module contains the adapter for the external AI collaborator service.
//! It implements the `CollaboratorService` port from the `core` crate over
//! plain HTTP/JSON.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use research_chat_core::domain::ChatMessage;
use research_chat_core::ports::{CollaboratorService, PortError, PortResult};

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
struct HistoryEntry<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct AskRequest<'a> {
    session_id: Uuid,
    question: &'a str,
    chat_history: Vec<HistoryEntry<'a>>,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: String,
}

#[derive(Serialize)]
struct ProcessRequest<'a> {
    session_id: Uuid,
    urls: &'a [String],
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that forwards questions and source URLs to the collaborator
/// service. The client carries the configured total timeout, so a hung
/// collaborator surfaces as `Upstream` instead of a stuck request.
pub struct HttpCollaborator {
    client: Client,
    ask_url: String,
    process_url: String,
}

impl HttpCollaborator {
    /// Creates a new `HttpCollaborator` rooted at the service's base URL.
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            ask_url: format!("{}/ask", base_url),
            process_url: format!("{}/process", base_url),
        }
    }
}

fn upstream(call: &str, e: reqwest::Error) -> PortError {
    if e.is_timeout() {
        PortError::Upstream(format!("{} call timed out", call))
    } else {
        PortError::Upstream(format!("{} call failed: {}", call, e))
    }
}

//=========================================================================================
// `CollaboratorService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CollaboratorService for HttpCollaborator {
    async fn answer_question(
        &self,
        session_id: Uuid,
        question: &str,
        history: &[ChatMessage],
    ) -> PortResult<String> {
        debug!(
            "Asking collaborator about session {} with {} prior messages",
            session_id,
            history.len()
        );

        let request = AskRequest {
            session_id,
            question,
            chat_history: history
                .iter()
                .map(|m| HistoryEntry {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };

        let response = self
            .client
            .post(&self.ask_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| upstream("ask", e))?
            .error_for_status()
            .map_err(|e| upstream("ask", e))?;

        let body: AskResponse = response.json().await.map_err(|e| upstream("ask", e))?;
        Ok(body.answer)
    }

    async fn process_sources(&self, session_id: Uuid, urls: &[String]) -> PortResult<()> {
        debug!(
            "Seeding collaborator knowledge base for session {} from {} urls",
            session_id,
            urls.len()
        );

        let request = ProcessRequest { session_id, urls };
        self.client
            .post(&self.process_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| upstream("process", e))?
            .error_for_status()
            .map_err(|e| upstream("process", e))?;
        Ok(())
    }
}
