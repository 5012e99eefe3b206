//! services/api/src/web/chat.rs
//!
//! Axum handlers for the protected chat endpoints. The auth middleware has
//! already validated the bearer token and stashed the caller's user id in
//! the request extensions.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct CreateChatRequest {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CreateChatResponse {
    pub session_id: Uuid,
}

#[derive(Serialize, ToSchema)]
pub struct ChatSummary {
    pub id: Uuid,
    pub title: String,
}

#[derive(Serialize, ToSchema)]
pub struct MessageView {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct SendMessageResponse {
    pub answer: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SeedSourcesRequest {
    pub urls: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SeedSourcesResponse {
    pub message: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/chats - Start a new research session
#[utoipa::path(
    post,
    path = "/api/chats",
    request_body = CreateChatRequest,
    responses(
        (status = 200, description = "Session created", body = CreateChatResponse),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn create_chat_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<CreateChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = state
        .chat
        .create_session(user_id, req.title.as_deref())
        .await?;

    Ok(Json(CreateChatResponse { session_id }))
}

/// GET /api/chats - List the caller's sessions, most recently updated first
#[utoipa::path(
    get,
    path = "/api/chats",
    responses(
        (status = 200, description = "The caller's sessions", body = [ChatSummary]),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn list_chats_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = state.chat.list_sessions(user_id).await?;

    let summaries: Vec<ChatSummary> = sessions
        .into_iter()
        .map(|s| ChatSummary {
            id: s.id,
            title: s.title,
        })
        .collect();
    Ok(Json(summaries))
}

/// GET /api/chats/{id}/messages - A session's messages in creation order
#[utoipa::path(
    get,
    path = "/api/chats/{id}/messages",
    params(("id" = Uuid, Path, description = "The session to read")),
    responses(
        (status = 200, description = "The session's messages", body = [MessageView]),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such session owned by the caller"),
    )
)]
pub async fn list_messages_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = state.chat.list_messages(user_id, session_id).await?;

    let views: Vec<MessageView> = messages
        .into_iter()
        .map(|m| MessageView {
            role: m.role.to_string(),
            content: m.content,
        })
        .collect();
    Ok(Json(views))
}

/// POST /api/chats/{id}/message - Ask a question and wait for the answer
#[utoipa::path(
    post,
    path = "/api/chats/{id}/message",
    params(("id" = Uuid, Path, description = "The session to ask in")),
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "The collaborator's answer", body = SendMessageResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such session owned by the caller"),
        (status = 502, description = "The AI service failed or timed out; the question is still recorded"),
    )
)]
pub async fn send_message_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let answer = state
        .chat
        .send_message(user_id, session_id, &req.message)
        .await?;

    Ok(Json(SendMessageResponse { answer }))
}

/// POST /api/chats/{id}/sources - Seed the AI's knowledge base for a session
#[utoipa::path(
    post,
    path = "/api/chats/{id}/sources",
    params(("id" = Uuid, Path, description = "The session to seed")),
    request_body = SeedSourcesRequest,
    responses(
        (status = 200, description = "Sources handed to the AI service", body = SeedSourcesResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such session owned by the caller"),
        (status = 502, description = "The AI service failed or timed out"),
    )
)]
pub async fn seed_sources_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SeedSourcesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .chat
        .seed_sources(user_id, session_id, &req.urls)
        .await?;

    Ok(Json(SeedSourcesResponse {
        message: "Sources processed".to_string(),
    }))
}
